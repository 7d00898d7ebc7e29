use super::*;
use crate::model::{FilterSpec, PredicateSpec, Route};

fn route_with_filter() -> Route {
    let mut args = crate::model::ArgMap::new();
    args.insert("X".to_string(), serde_json::json!("1"));
    Route {
        id: "r1".to_string(),
        uri: "lb://a".to_string(),
        order: 1,
        enabled: true,
        predicates: Vec::new(),
        filters: vec![FilterSpec {
            name: "AddHeader".to_string(),
            args,
            enabled: true,
        }],
        predicate_description: None,
        filter_description: None,
    }
}

#[test]
fn starts_in_list_view() {
    let controller = FormController::default();
    assert_eq!(controller.view(), ConsoleView::ListView);
    assert!(controller.form().is_none());
}

#[test]
fn create_form_has_schema_defaults() {
    let mut controller = FormController::default();
    controller.show_create_form();

    assert_eq!(controller.view(), ConsoleView::FormView);
    let form = controller.form().unwrap();
    assert_eq!(form.mode, FormMode::Create);
    assert_eq!(form.id, "");
    assert_eq!(form.uri, "lb://");
    assert_eq!(form.order, "0");
    assert!(form.enabled);
    assert!(form.predicates.is_empty());
    assert!(form.filters.is_empty());
}

#[test]
fn edit_form_transcodes_and_does_not_alias_the_entity() {
    let mut controller = FormController::default();
    let route = route_with_filter();
    controller.show_edit_form(&route);

    let form = controller.form().unwrap();
    assert_eq!(
        form.mode,
        FormMode::Edit {
            original_id: "r1".to_string()
        }
    );
    assert_eq!(form.filters.len(), 1);
    assert_eq!(form.filters[0].args_json, "{\n  \"X\": \"1\"\n}");

    // Mutating the form must leave the source entity untouched.
    controller.form_mut().unwrap().uri = "lb://changed".to_string();
    assert_eq!(route.uri, "lb://a");
}

#[test]
fn submitting_unchanged_edit_reproduces_the_original_args() {
    let mut controller = FormController::default();
    let route = route_with_filter();
    controller.show_edit_form(&route);

    let rebuilt = controller.form().unwrap().to_route().unwrap();
    assert_eq!(rebuilt, route);
}

#[test]
fn list_view_discards_form() {
    let mut controller = FormController::default();
    controller.show_create_form();
    controller.form_mut().unwrap().uri = "lb://abandoned".to_string();
    controller.show_list_view();

    assert_eq!(controller.view(), ConsoleView::ListView);
    assert!(controller.form().is_none());

    // Re-entering create mode starts from the defaults again.
    controller.show_create_form();
    assert_eq!(controller.form().unwrap().uri, "lb://");
}

#[test]
fn add_and_remove_sub_documents() {
    let mut controller = FormController::default();
    controller.show_create_form();

    controller.add_sub_document(SubDocKind::Predicate);
    controller.add_sub_document(SubDocKind::Filter);
    controller.add_sub_document(SubDocKind::Filter);
    {
        let form = controller.form().unwrap();
        assert_eq!(form.predicates.len(), 1);
        assert_eq!(form.filters.len(), 2);
        assert_eq!(form.predicates[0].args_json, "{}");
        assert!(form.filters[0].enabled);
    }

    controller.remove_sub_document(SubDocKind::Filter, 0);
    assert_eq!(controller.form().unwrap().filters.len(), 1);

    // Out-of-bounds removal is a no-op.
    controller.remove_sub_document(SubDocKind::Filter, 5);
    controller.remove_sub_document(SubDocKind::Predicate, 1);
    let form = controller.form().unwrap();
    assert_eq!(form.filters.len(), 1);
    assert_eq!(form.predicates.len(), 1);
}

#[test]
fn order_text_is_coerced_to_number() {
    let mut controller = FormController::default();
    controller.show_create_form();
    controller.form_mut().unwrap().order = "  42 ".to_string();
    assert_eq!(controller.form().unwrap().to_route().unwrap().order, 42);

    controller.form_mut().unwrap().order = String::new();
    assert_eq!(controller.form().unwrap().to_route().unwrap().order, 0);

    controller.form_mut().unwrap().order = "abc".to_string();
    let err = controller.form().unwrap().to_route().unwrap_err();
    assert!(matches!(err, crate::error::ConsoleError::Validation(_)));
}

#[test]
fn edit_mode_preserves_identity_even_if_the_field_was_touched() {
    let mut controller = FormController::default();
    controller.show_edit_form(&route_with_filter());
    controller.form_mut().unwrap().id = "tampered".to_string();

    let rebuilt = controller.form().unwrap().to_route().unwrap();
    assert_eq!(rebuilt.id, "r1");
}

#[test]
fn add_predicate() {
    let pred = PredicateSpec {
        name: "Path".to_string(),
        args: Default::default(),
    };
    let mut route = route_with_filter();
    route.predicates.push(pred);

    let mut controller = FormController::default();
    controller.show_edit_form(&route);
    assert_eq!(controller.form().unwrap().predicates.len(), 1);
}
