//! Serves recorded interactions back in order.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Per port/method queues of recorded interactions.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), Vec<Interaction>>,
    cursors: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Indexes the interactions of `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push(interaction.clone());
        }
        Self { queues, cursors: HashMap::new() }
    }

    /// Returns the next unconsumed interaction for `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded for the pair or every recorded
    /// interaction has been consumed. A replay that diverges from its
    /// recording is a test bug, not a runtime condition.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}. \
                 Recorded pairs: [{}]",
                available.join(", ")
            );
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {} interactions for {port}::{method} have been consumed",
            queue.len(),
        );
        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "t".into(), recorded_at: Utc::now(), backend: "b".into(), interactions }
    }

    #[test]
    fn serves_each_pair_in_recorded_order() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![
            interaction(0, "files", "read", json!({"ok": "v1"})),
            interaction(1, "clock", "now", json!("2025-01-01T00:00:00Z")),
            interaction(2, "files", "read", json!({"ok": "v2"})),
        ]));

        assert_eq!(replayer.next_interaction("files", "read").seq, 0);
        assert_eq!(replayer.next_interaction("clock", "now").seq, 1);
        assert_eq!(replayer.next_interaction("files", "read").output, json!({"ok": "v2"}));
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_pair_panics() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "id_gen", "generate_id", json!("a"))]));
        let _ = replayer.next_interaction("id_gen", "generate_id");
        let _ = replayer.next_interaction("id_gen", "generate_id");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_pair_panics() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![]));
        let _ = replayer.next_interaction("files", "delete");
    }
}
