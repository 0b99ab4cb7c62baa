//! Command building logic for the subprocess transport

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::VERSION;
use crate::types::options::{AdapterOptions, EmptyArgs, StderrMode};

use super::config::{DANGEROUS_ENV_VARS, ENV_ADAPTER_VERSION};

/// Command builder for ant-tools
pub struct CommandBuilder<'a> {
    executable: &'a Path,
    args: &'a [String],
    options: &'a AdapterOptions,
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    pub fn new(executable: &'a Path, args: &'a [String], options: &'a AdapterOptions) -> Self {
        Self {
            executable,
            args,
            options,
        }
    }

    /// Arguments as they will reach the child, after the empty-args policy
    pub fn effective_args(&self) -> Vec<&'a str> {
        if self.args.is_empty() && self.options.empty_args == EmptyArgs::SingleEmptyArgument {
            return vec![""];
        }
        self.args.iter().map(String::as_str).collect()
    }

    /// Build the complete command with arguments, environment and stdio
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(self.executable);
        cmd.args(self.effective_args());

        self.add_environment(&mut cmd);

        if let Some(ref cwd) = self.options.cwd {
            cmd.current_dir(cwd);
        }

        // stdin stays inherited, like a plain shell invocation of the tool
        cmd.stdout(Stdio::piped());
        match self.options.stderr {
            StderrMode::Inherit => cmd.stderr(Stdio::inherit()),
            StderrMode::Capture => cmd.stderr(Stdio::piped()),
        };

        cmd
    }

    fn add_environment(&self, cmd: &mut Command) {
        let mut extra = HashMap::new();

        for (key, value) in &self.options.env {
            if DANGEROUS_ENV_VARS.contains(&key.as_str()) {
                log::warn!("Not forwarding {key} to ant-tools");
                continue;
            }
            extra.insert(key.clone(), value.clone());
        }

        extra.insert(ENV_ADAPTER_VERSION.to_string(), VERSION.to_string());

        if let Some(ref cwd) = self.options.cwd {
            extra.insert("PWD".to_string(), cwd.to_string_lossy().to_string());
        } else if let Ok(current) = env::current_dir() {
            extra.insert("PWD".to_string(), current.to_string_lossy().to_string());
        }

        cmd.envs(extra);
    }
}
