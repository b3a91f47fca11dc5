//! TmuxCommandRunner trait and the real subprocess executor.

use crate::error::TmuxError;

/// Trait for executing tmux commands. Everything in this crate takes a
/// runner instead of shelling out directly, so tests inject mocks.
pub trait TmuxCommandRunner {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }
}

/// Real executor using `std::process::Command` against the ambient tmux
/// server. Trailing newlines are stripped from stdout.
pub struct TmuxExecutor {
    tmux_bin: String,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
        }
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = std::process::Command::new(&self.tmux_bin)
            .args(args)
            .output()
            .map_err(TmuxError::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TmuxError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end_matches('\n')
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_executor_targets_tmux() {
        let exec = TmuxExecutor::default();
        assert_eq!(exec.tmux_bin, "tmux");
    }

    #[test]
    fn blanket_ref_impl() {
        struct Mock;
        impl TmuxCommandRunner for Mock {
            fn run(&self, _args: &[&str]) -> Result<String, TmuxError> {
                Ok("ok".to_string())
            }
        }
        let mock = Mock;
        let r: &Mock = &mock;
        assert_eq!(r.run(&[]).expect("ok"), "ok");
    }
}
