//! Batch command envelope posted to the daemon's action endpoint.

use serde::{Deserialize, Serialize};

/// Directional queue moves accepted by the daemon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueueShift {
    /// Raise priority by one slot.
    Up,
    /// Lower priority by one slot.
    Down,
    /// Move to the head of the queue.
    Top,
    /// Move to the tail of the queue.
    Bottom,
}

/// Which daemon path a relocation updates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    /// Incomplete-download directory.
    Download,
    /// Final save directory.
    Save,
}

/// One daemon-side operation applied to a batch of torrents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TorrentCommand {
    /// Pause transfers.
    Pause,
    /// Resume transfers under queue limits.
    Resume,
    /// Resume transfers bypassing queue limits.
    ForceResume,
    /// Re-verify piece data.
    Recheck,
    /// Remove the torrents, optionally deleting payload data.
    Delete {
        /// Whether payload files are removed as well.
        delete_files: bool,
    },
    /// Replace the assigned category.
    SetCategory {
        /// New category name (empty clears it).
        category: String,
    },
    /// Add labels.
    AddTags {
        /// Tags to apply.
        tags: Vec<String>,
    },
    /// Remove labels; `None` clears every tag.
    RemoveTags {
        /// Tags to remove, or `None` for all.
        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    },
    /// Relocate payload files.
    SetLocation {
        /// Which path the move updates.
        target: MoveTarget,
        /// New directory.
        path: String,
    },
    /// Shift queue position.
    Queue {
        /// Direction of the move.
        shift: QueueShift,
    },
}

/// Request body for the batch action endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandEnvelope {
    /// Info-hashes the command applies to.
    pub hashes: Vec<String>,
    /// The operation itself.
    pub command: TorrentCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_serialize_with_type_tag() {
        let envelope = CommandEnvelope {
            hashes: vec!["h1".into(), "h2".into()],
            command: TorrentCommand::Delete { delete_files: true },
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "hashes": ["h1", "h2"],
                "command": {"type": "delete", "delete_files": true}
            })
        );
    }

    #[test]
    fn remove_tags_omits_absent_tag_list() {
        let cleared = serde_json::to_value(TorrentCommand::RemoveTags { tags: None }).unwrap();
        assert_eq!(cleared, json!({"type": "remove_tags"}));

        let partial = serde_json::to_value(TorrentCommand::RemoveTags {
            tags: Some(vec!["old".into()]),
        })
        .unwrap();
        assert_eq!(partial, json!({"type": "remove_tags", "tags": ["old"]}));
    }

    #[test]
    fn queue_shift_uses_snake_case_labels() {
        let top = serde_json::to_value(TorrentCommand::Queue {
            shift: QueueShift::Top,
        })
        .unwrap();
        assert_eq!(top, json!({"type": "queue", "shift": "top"}));
    }
}
