use std::time::Duration;

use tokio::io::AsyncBufReadExt;

use crate::cli::client::ApiClient;

/// Keystroke debounce window, matching the web client's 300ms
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Orders search requests and rejects stale responses. Each request takes a
/// monotonically increasing sequence number; a response is rendered only if
/// nothing newer has been rendered already, so a slow early response can
/// never overwrite a fresher one.
#[derive(Debug, Default)]
pub struct ResponseGate {
    next_seq: u64,
    last_rendered: u64,
}

impl ResponseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the next outbound request
    pub fn begin(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// True if the response for `seq` should be rendered
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.last_rendered {
            return false;
        }
        self.last_rendered = seq;
        true
    }
}

/// Interactive search-as-you-type: each input line supersedes the previous
/// one, cancelling its pending request after the debounce window, and stale
/// responses are dropped at the gate. An empty line exits.
pub async fn interactive(client: ApiClient) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<(u64, Vec<String>)>();
    let mut gate = ResponseGate::new();
    let mut pending: Option<tokio::task::JoinHandle<()>> = None;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    println!("Type to search exercises; empty line quits.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let query = line.trim().to_string();
                if query.is_empty() {
                    break;
                }

                // A new keystroke cancels the request still waiting out its
                // debounce window
                if let Some(handle) = pending.take() {
                    handle.abort();
                }

                let seq = gate.begin();
                let task_client = client.clone();
                let task_tx = tx.clone();
                pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(DEBOUNCE).await;
                    match task_client.search_exercises(&query).await {
                        Ok(results) => {
                            let _ = task_tx.send((seq, results));
                        }
                        Err(e) => eprintln!("Search error: {e}"),
                    }
                }));
            }
            Some((seq, results)) = rx.recv() => {
                if gate.accept(seq) {
                    render_results(&results);
                }
            }
        }
    }

    Ok(())
}

pub fn render_results(results: &[String]) {
    if results.is_empty() {
        println!("  (no matches)");
        return;
    }
    for name in results {
        println!("  {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase_monotonically() {
        let mut gate = ResponseGate::new();
        let a = gate.begin();
        let b = gate.begin();
        assert!(b > a);
    }

    #[test]
    fn stale_response_is_discarded_after_newer_render() {
        let mut gate = ResponseGate::new();
        let slow = gate.begin();
        let fast = gate.begin();

        // The later request resolves first and renders
        assert!(gate.accept(fast));
        // The earlier, slower response must not overwrite it
        assert!(!gate.accept(slow));
    }

    #[test]
    fn in_order_responses_all_render() {
        let mut gate = ResponseGate::new();
        let a = gate.begin();
        let b = gate.begin();
        assert!(gate.accept(a));
        assert!(gate.accept(b));
    }

    #[test]
    fn duplicate_response_renders_once() {
        let mut gate = ResponseGate::new();
        let a = gate.begin();
        assert!(gate.accept(a));
        assert!(!gate.accept(a));
    }
}
