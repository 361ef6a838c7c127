use crate::commands::{CmdMessage, CmdResult};
use crate::config::KodbConfig;
use crate::error::Result;
use crate::pipeline::find_program;

/// Reports which of the programs a build needs are on `PATH`.
/// Missing programs are error messages; the caller decides how to exit.
pub fn run(config: &KodbConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for program in config.required_programs() {
        match find_program(&program) {
            Some(path) => {
                result.add_message(CmdMessage::success(format!(
                    "{} found at {}",
                    program,
                    path.display()
                )));
                result.paths.push(path);
            }
            None => result.add_message(CmdMessage::error(format!("{} not found on PATH", program))),
        }
    }
    Ok(result)
}
