//! Test doubles and fixtures

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use sitedeploy::deploy::runner::{CommandOutput, CommandRunner, Invocation};

pub const SITE_FILES: [&str; 4] = ["index.html", "styles.css", "script.js", "logo.png"];

/// Scripted reply for a command
#[derive(Debug, Clone)]
pub enum Reply {
    Exit(CommandOutput),
    NotFound,
}

pub fn ok(stdout: &str) -> Reply {
    Reply::Exit(CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

pub fn fail(code: i32, stdout: &str, stderr: &str) -> Reply {
    Reply::Exit(CommandOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

/// Records every invocation and answers from a script.
///
/// Commands are matched by command-line prefix, first rule wins. Replies for
/// a rule are consumed in order and the last one repeats. Unmatched commands
/// succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    rules: Mutex<Vec<(String, VecDeque<Reply>)>>,
}

impl FakeRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, prefix: &str, reply: Reply) -> &Self {
        let mut rules = self.rules.lock().unwrap();
        match rules.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, replies)) => replies.push_back(reply),
            None => rules.push((prefix.to_string(), VecDeque::from([reply]))),
        }
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded command lines
    pub fn calls(&self) -> Vec<String> {
        self.invocations().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        let line = invocation.to_string();
        let reply = {
            let mut rules = self.rules.lock().unwrap();
            rules
                .iter_mut()
                .find(|(prefix, _)| line.starts_with(prefix.as_str()))
                .map(|(_, replies)| {
                    if replies.len() > 1 {
                        replies.pop_front().unwrap()
                    } else {
                        replies.front().cloned().unwrap()
                    }
                })
        };

        match reply {
            Some(Reply::Exit(output)) => Ok(output),
            Some(Reply::NotFound) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", invocation.program),
            )),
            None => Ok(CommandOutput {
                code: Some(0),
                ..Default::default()
            }),
        }
    }
}

/// A site root containing `files`
pub fn site_with(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        write_file(dir.path(), name);
    }
    dir
}

/// A site root containing every default required file
pub fn complete_site() -> TempDir {
    site_with(&SITE_FILES)
}

pub fn write_file(root: &Path, name: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("contents of {name}")).unwrap();
}
