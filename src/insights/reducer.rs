//! Feed reconciliation reducer
//!
//! Mutation handlers tag their responses with an action; clients queue the
//! tagged responses and drain them into a local copy of the feed. The merge
//! rules live here as a pure reducer so they can be tested without a UI
//! runtime.

use super::models::Insight;

pub const ACTION_PREPEND: &str = "prepend";
pub const ACTION_MERGE: &str = "merge";
pub const ACTION_DELETE: &str = "delete";

/// A queued, action-tagged server response
#[derive(Debug, Clone)]
pub enum FeedAction {
    Prepend(Insight),
    Merge(Insight),
    Delete { uid: String },
}

impl FeedAction {
    pub fn tag(&self) -> &'static str {
        match self {
            FeedAction::Prepend(_) => ACTION_PREPEND,
            FeedAction::Merge(_) => ACTION_MERGE,
            FeedAction::Delete { .. } => ACTION_DELETE,
        }
    }

    /// Wire envelope the mutation handlers respond with
    pub fn envelope(&self) -> serde_json::Value {
        match self {
            FeedAction::Prepend(insight) | FeedAction::Merge(insight) => {
                serde_json::json!({ "action": self.tag(), "insight": insight })
            }
            FeedAction::Delete { uid } => {
                serde_json::json!({ "action": self.tag(), "uid": uid })
            }
        }
    }
}

/// Apply one action to the feed.
///
/// The feed never holds two facts with the same uid: a prepend whose uid is
/// already present degrades to a merge. Merging an unknown uid is a no-op.
/// This is the client half of the protocol; the server only emits actions.
#[allow(dead_code)]
pub fn apply(feed: &mut Vec<Insight>, action: FeedAction) {
    match action {
        FeedAction::Prepend(insight) => {
            if let Some(existing) = feed.iter_mut().find(|f| f.uid == insight.uid) {
                *existing = insight;
            } else {
                feed.insert(0, insight);
            }
        }
        FeedAction::Merge(insight) => {
            if let Some(existing) = feed.iter_mut().find(|f| f.uid == insight.uid) {
                *existing = insight;
            }
        }
        FeedAction::Delete { uid } => {
            feed.retain(|f| f.uid != uid);
        }
    }
}

/// Drain queued responses into the feed in pop (LIFO) order
#[allow(dead_code)]
pub fn drain(feed: &mut Vec<Insight>, queue: &mut Vec<FeedAction>) {
    while let Some(action) = queue.pop() {
        apply(feed, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(uid: &str, text: &str) -> Insight {
        Insight {
            id: 0,
            uid: uid.to_string(),
            text: text.to_string(),
            url: None,
            source_baseurl: None,
            user_id: 1,
            likes: 0,
            dislikes: 0,
            created_at: None,
            updated_at: None,
        }
    }

    fn uids(feed: &[Insight]) -> Vec<&str> {
        feed.iter().map(|f| f.uid.as_str()).collect()
    }

    #[test]
    fn test_prepend_inserts_at_front() {
        let mut feed = vec![fact("N_1", "one")];
        apply(&mut feed, FeedAction::Prepend(fact("N_2", "two")));
        assert_eq!(uids(&feed), vec!["N_2", "N_1"]);
    }

    #[test]
    fn test_duplicate_prepend_degrades_to_merge() {
        let mut feed = vec![fact("N_1", "one"), fact("N_2", "two")];
        apply(&mut feed, FeedAction::Prepend(fact("N_2", "revised")));
        assert_eq!(uids(&feed), vec!["N_1", "N_2"]);
        assert_eq!(feed[1].text, "revised");
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let mut feed = vec![fact("N_1", "one"), fact("N_2", "two")];
        apply(&mut feed, FeedAction::Merge(fact("N_1", "revised")));
        assert_eq!(uids(&feed), vec!["N_1", "N_2"]);
        assert_eq!(feed[0].text, "revised");
    }

    #[test]
    fn test_merge_of_unknown_uid_is_a_no_op() {
        let mut feed = vec![fact("N_1", "one")];
        apply(&mut feed, FeedAction::Merge(fact("N_9", "ghost")));
        assert_eq!(uids(&feed), vec!["N_1"]);
    }

    #[test]
    fn test_delete_removes_by_uid() {
        let mut feed = vec![fact("N_1", "one"), fact("N_2", "two")];
        apply(&mut feed, FeedAction::Delete { uid: "N_1".to_string() });
        assert_eq!(uids(&feed), vec!["N_2"]);
    }

    #[test]
    fn test_delete_of_unknown_uid_is_a_no_op() {
        let mut feed = vec![fact("N_1", "one")];
        apply(&mut feed, FeedAction::Delete { uid: "N_9".to_string() });
        assert_eq!(uids(&feed), vec!["N_1"]);
    }

    #[test]
    fn test_drain_applies_in_lifo_order() {
        let mut feed = vec![fact("N_1", "one")];
        let mut queue = vec![
            FeedAction::Prepend(fact("N_2", "two")),
            FeedAction::Merge(fact("N_2", "revised two")),
            FeedAction::Delete { uid: "N_1".to_string() },
        ];

        // popping runs the delete first and the prepend last
        drain(&mut feed, &mut queue);

        assert!(queue.is_empty());
        assert_eq!(uids(&feed), vec!["N_2"]);
        // the merge ran before the prepend existed, so the prepended text wins
        assert_eq!(feed[0].text, "two");
    }

    #[test]
    fn test_action_tags_match_wire_format() {
        assert_eq!(FeedAction::Prepend(fact("N_1", "x")).tag(), "prepend");
        assert_eq!(FeedAction::Merge(fact("N_1", "x")).tag(), "merge");
        assert_eq!(FeedAction::Delete { uid: "N_1".into() }.tag(), "delete");
    }
}
