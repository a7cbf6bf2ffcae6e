//! Property-Based Tests for the Document Store
//!
//! **Property 1: Vote idempotence**
//! For any sequence of votes by the same agent on the same proposal, only the
//! most recent vote is present in the vote set.
//!
//! **Property 2: Bounded task history**
//! For any sequence of >= 101 task appends, the task list always holds
//! exactly the 100 most recent tasks, newest first.

use beacon_core::{ProposalKind, ProposalPriority, VoteChoice, MAX_TASK_HISTORY};
use beacon_storage::{InMemorySnapshotBackend, NewProposal, NewTask, StatusStore};
use proptest::prelude::*;
use tokio::runtime::Runtime;

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

fn vote_strategy() -> impl Strategy<Value = VoteChoice> {
    prop_oneof![Just(VoteChoice::Up), Just(VoteChoice::Down)]
}

/// Strategy for generating voter ids, biased toward collisions so replace
/// semantics actually get exercised.
fn voter_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a1".to_string()),
        Just("a2".to_string()),
        Just("a3".to_string()),
        "[a-z]{2,6}".prop_map(|s| s),
    ]
}

proptest! {
    #[test]
    fn latest_vote_per_agent_wins(votes in prop::collection::vec((voter_strategy(), vote_strategy()), 1..40)) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let store = StatusStore::open(InMemorySnapshotBackend::new(), 64).await;
            let proposal = store
                .append_proposal(NewProposal {
                    agent_id: "proposer".to_string(),
                    title: "subject".to_string(),
                    description: String::new(),
                    kind: ProposalKind::Tool,
                    priority: ProposalPriority::Medium,
                })
                .await
                .expect("append proposal");

            let mut latest = std::collections::HashMap::new();
            let mut final_state = proposal.clone();
            for (voter, vote) in &votes {
                latest.insert(voter.clone(), *vote);
                final_state = store
                    .vote_proposal(proposal.id, voter, *vote)
                    .await
                    .expect("vote");
            }

            // One vote per distinct voter, each equal to that voter's last cast.
            prop_assert_eq!(final_state.votes.len(), latest.len());
            for vote in &final_state.votes {
                prop_assert_eq!(latest.get(&vote.agent_id).copied(), Some(vote.vote));
            }
            Ok(())
        })?;
    }

    #[test]
    fn task_list_never_exceeds_bound(count in 101usize..150) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let store = StatusStore::open(InMemorySnapshotBackend::new(), 64).await;

            for i in 0..count {
                store
                    .append_task(NewTask {
                        agent_id: "a1".to_string(),
                        title: format!("task {i}"),
                        outcome: String::new(),
                        link: String::new(),
                    })
                    .await
                    .expect("append task");
            }

            let tasks = store.tasks().await;
            prop_assert_eq!(tasks.len(), MAX_TASK_HISTORY);
            // Exactly the most recent MAX_TASK_HISTORY appends, newest first.
            for (offset, task) in tasks.iter().enumerate() {
                prop_assert_eq!(&task.title, &format!("task {}", count - 1 - offset));
            }
            Ok(())
        })?;
    }
}
