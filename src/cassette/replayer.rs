//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions port by port, in recorded order.
///
/// Calls on one port must arrive in the order they were recorded; a call
/// whose method differs from the next recorded one is a replay divergence.
pub struct CassetteReplayer {
    queues: HashMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Creates a replayer over all interactions of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues.entry(interaction.port.clone()).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Number of interactions not yet replayed for `port`.
    #[must_use]
    pub fn remaining(&self, port: &str) -> usize {
        self.queues.get(port).map_or(0, VecDeque::len)
    }

    /// Returns the next recorded interaction for `port`, which must be a call to `method`.
    ///
    /// # Panics
    ///
    /// Panics if the port has nothing left to replay or if the next recorded
    /// call on the port is a different method.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let Some(queue) = self.queues.get_mut(port) else {
            let mut available: Vec<&str> = self.queues.keys().map(String::as_str).collect();
            available.sort_unstable();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} \
                 (called {method:?}). Recorded ports: [{}]",
                available.join(", ")
            );
        };

        let Some(next) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} have been replayed \
                 (called {method:?})."
            );
        };

        assert!(
            next.method == method,
            "Replay diverged on port={port:?}: called {method:?} but interaction seq={} \
             recorded {:?}",
            next.seq,
            next.method,
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { interactions, ..Cassette::new("test") }
    }

    #[test]
    fn replays_each_port_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "fs", "is_dir", json!(true)),
            interaction(1, "id_gen", "generate_id", json!("a1")),
            interaction(2, "fs", "list_dir", json!({"ok": {"names": ["index.js"]}})),
            interaction(3, "id_gen", "generate_id", json!("a2")),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("id_gen", "generate_id").output, json!("a1"));
        assert_eq!(replayer.next_interaction("fs", "is_dir").output, json!(true));
        assert_eq!(replayer.remaining("fs"), 1);
        assert_eq!(replayer.next_interaction("fs", "list_dir").seq, 2);
        assert_eq!(replayer.next_interaction("id_gen", "generate_id").output, json!("a2"));
        assert_eq!(replayer.remaining("id_gen"), 0);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_port_panics() {
        let cassette = make_cassette(vec![interaction(0, "prompt", "confirm", json!(true))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("prompt", "confirm");
        let _ = replayer.next_interaction("prompt", "confirm");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("sandbox", "create_sandbox");
    }

    #[test]
    #[should_panic(expected = "Replay diverged")]
    fn method_mismatch_panics() {
        let cassette = make_cassette(vec![interaction(0, "fs", "read", json!({"ok": []}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("fs", "exists");
    }
}
