use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::warn;

use super::MenuSurface;
use crate::error::Result;
use crate::menu::{MenuAction, MenuNode};

/// Text rendition of the menu for platforms without a status bar.
///
/// Actionable rows are numbered; typing a number activates that row and `q`
/// quits.
pub struct TerminalSurface {
    actions: Vec<MenuAction>,
    input: Option<Receiver<String>>,
}

impl TerminalSurface {
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("lil-stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            });
        let input = match spawned {
            Ok(_) => Some(rx),
            Err(err) => {
                warn!(%err, "could not read from stdin");
                None
            }
        };

        Ok(Self {
            actions: Vec::new(),
            input,
        })
    }

    fn resolve_input(&self, line: &str) -> Option<MenuAction> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Some(MenuAction::Quit);
        }
        let index: usize = line.parse().ok()?;
        self.actions.get(index.checked_sub(1)?).cloned()
    }
}

pub(super) fn render_lines(nodes: &[MenuNode]) -> Vec<String> {
    let mut number = 0;
    nodes
        .iter()
        .map(|node| match node {
            MenuNode::Header(text) => format!("[{text}]"),
            MenuNode::Separator => "----".to_string(),
            MenuNode::Leaf(leaf) if leaf.action.is_some() => {
                number += 1;
                format!("{number:>3}. {}", leaf.title)
            }
            MenuNode::Leaf(leaf) => format!("     {}", leaf.title),
        })
        .collect()
}

impl MenuSurface for TerminalSurface {
    fn show(&mut self, nodes: &[MenuNode]) {
        self.actions = nodes.iter().filter_map(MenuNode::action).cloned().collect();

        let mut out = io::stdout().lock();
        let _ = writeln!(out);
        for line in render_lines(nodes) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    fn next_action(&mut self, timeout: Duration) -> Option<MenuAction> {
        let Some(input) = &self.input else {
            thread::sleep(timeout);
            return None;
        };
        match input.recv_timeout(timeout) {
            Ok(line) => self.resolve_input(&line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // stdin closed; keep running until killed.
                self.input = None;
                None
            }
        }
    }
}
