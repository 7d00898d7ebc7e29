use anyhow::Result;

use crate::model::ConsoleConfig;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub config: ConsoleConfig,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
