//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking the shared CommandContext.

use confd_core::error::{ConfdError, ConfdResult};
use confd_core::Strategy;
use confd_resolver::Conf;
use tracing::info;

pub mod get;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub conf: Conf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Bind a handle to `root` using the strategy called `strategy`
    pub fn new(root: &str, strategy: &str) -> ConfdResult<Self> {
        let mut conf = confd_resolver::from(root)?;
        conf.strategy().set(strategy)?;

        Ok(Self {
            conf,
            output: OutputHandler::new(),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Commands::Get { segments, compact } => {
            info!("Resolving {:?} from {}", segments, ctx.conf);
            get::execute(segments, compact, ctx).await
        }
        Commands::Strategies => {
            for line in strategy_lines(ctx.conf.current_strategy()) {
                ctx.output.line(&line);
            }
            Ok(())
        }
    }
}

/// One line per strategy, flagging the default and the selected one
pub fn strategy_lines(selected: Strategy) -> Vec<String> {
    Strategy::ALL
        .iter()
        .map(|&strategy| {
            let marker = if strategy == selected { "*" } else { " " };
            if strategy == Strategy::default_strategy() {
                format!("{} {} (default)", marker, strategy)
            } else {
                format!("{} {}", marker, strategy)
            }
        })
        .collect()
}

/// Suggest the strategy closest to a mistyped name
pub fn suggest_similar_strategy(input: &str) -> Option<Strategy> {
    let input = input.to_ascii_uppercase();

    Strategy::ALL
        .iter()
        .map(|&strategy| (edit_distance(&input, strategy.as_str()), strategy))
        .filter(|&(distance, _)| distance <= 2)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, strategy)| strategy)
}

/// Hint for an error, if a better one than the generic suggestion exists
pub fn hint_for(error: &ConfdError) -> Option<String> {
    match error {
        ConfdError::InvalidStrategy { value } => {
            suggest_similar_strategy(value).map(|strategy| format!("Did you mean '{}'?", strategy))
        }
        _ => None,
    }
}

/// Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, &b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
