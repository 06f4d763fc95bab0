//! End-to-end scenarios through the bundled engines
//!
//! Each test drives the engines the way a caller would: build from
//! configuration, then move caller-owned snapshots through the pure
//! operations.

use std::sync::{Arc, RwLock};
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};
use decentramind::common::{
    Agent, AgentType, Currency, EvolutionError, Proposal, ProposalStatus, ProposalType,
    TransactionStatus, TransactionType, TreasuryRole, TreasuryTransaction, Vote, VoteChoice,
    VoteError,
};
use decentramind::governance::{GovernanceMetrics, Outcome, ProposalInput, SignerStanding};
use decentramind::matcher::{classify, Domain};
use decentramind::{DecentraMindConfig, DecentraMindError, Engines};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn engines() -> Engines {
    init_tracing();
    Engines::new(DecentraMindConfig::default()).unwrap()
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn governance_input() -> ProposalInput {
    ProposalInput {
        title: "Amend the council charter".to_string(),
        description: "Raise the constitutional majority and add a guardian seat to the council."
            .to_string(),
        creator_wallet: "creator-wallet".to_string(),
        proposal_type: ProposalType::Governance,
        funding: None,
        tags: vec!["charter".to_string()],
    }
}

/// Draft, discuss and open a governance proposal for voting
fn open_for_voting(engines: &Engines) -> Proposal {
    let gov = &engines.governance;
    let draft = gov
        .create_proposal(governance_input(), dec!(5000), t0())
        .unwrap();
    let discussion = gov.open_discussion(&draft, t0()).unwrap();
    let opens = discussion.schedule.unwrap().discussion_end;
    gov.advance(&discussion, opens).unwrap()
}

fn cast(
    engines: &Engines,
    proposal: &Proposal,
    wallet: &str,
    choice: VoteChoice,
    power: Decimal,
) -> Proposal {
    let at = proposal.schedule.unwrap().discussion_end + Duration::hours(1);
    let vote = Vote::new(proposal.id, wallet, choice, power, at);
    engines.governance.record_vote(proposal, vote).unwrap()
}

fn tallied(engines: &Engines) -> Proposal {
    let proposal = open_for_voting(engines);
    let proposal = cast(engines, &proposal, "whale-for", VoteChoice::For, dec!(80000000));
    let proposal = cast(
        engines,
        &proposal,
        "whale-against",
        VoteChoice::Against,
        dec!(20000000),
    );
    cast(engines, &proposal, "whale-abstain", VoteChoice::Abstain, dec!(5000000))
}

#[test]
fn test_governance_proposal_passes_and_executes() {
    let engines = engines();
    let proposal = tallied(&engines);
    let voting_end = proposal.schedule.unwrap().voting_end;

    let (passed, resolution) = engines
        .governance
        .close_voting(&proposal, dec!(700000000), voting_end)
        .unwrap();

    assert_eq!(resolution.quorum, dec!(105000000));
    assert_eq!(resolution.total_votes, dec!(105000000));
    assert_eq!(resolution.outcome, Outcome::Passed);
    assert_eq!(passed.status, ProposalStatus::Passed);

    // still timelocked the day voting closes
    assert!(engines.governance.execute(&passed, voting_end).is_err());
    let executed = engines
        .governance
        .execute(&passed, voting_end + Duration::days(7))
        .unwrap();
    assert_eq!(executed.status, ProposalStatus::Executed);
}

#[test]
fn test_governance_proposal_fails_quorum_from_config() {
    init_tracing();
    let config = DecentraMindConfig::from_toml_str(
        r#"
        [governance.quorum]
        governance = "0.20"
        "#,
    )
    .unwrap();
    let engines = Engines::new(config).unwrap();
    let proposal = tallied(&engines);

    let (failed, resolution) = engines
        .governance
        .close_voting(
            &proposal,
            dec!(700000000),
            proposal.schedule.unwrap().voting_end,
        )
        .unwrap();

    assert_eq!(resolution.quorum, dec!(140000000));
    assert!(!resolution.quorum_met);
    assert!(resolution.majority_met);
    assert_eq!(failed.status, ProposalStatus::Failed);
}

#[test]
fn test_evolution_underpayment_is_rejected() {
    let engines = engines();
    let agent = Agent::new("Coordinator", "Technical", AgentType::Master);
    assert_eq!(agent.individual_stats.total_dmt_spent, Decimal::ZERO);

    let err = engines
        .evolution
        .apply_evolution(&agent, dec!(40), t0())
        .unwrap_err();
    assert_eq!(
        err,
        EvolutionError::InsufficientFunds {
            required: dec!(50),
            supplied: dec!(40),
        }
    );

    let unified: DecentraMindError = err.into();
    assert!(unified.to_string().contains("Insufficient DMT"));
}

#[test]
fn test_fitness_task_routes_to_wellness_agent() {
    let engines = engines();
    let pool = vec![Agent::new("Coach", "Health & Wellness", AgentType::Sub)];

    let task = "Help me create a fitness plan";
    assert_eq!(classify(task).unwrap(), Domain::HealthWellness);

    let outcome = engines.matcher.match_agents(task, &pool).unwrap();
    assert_eq!(outcome.domain(), Domain::HealthWellness);
    let matched = outcome.into_result().unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, pool[0].id);
}

#[test]
fn test_weak_voter_is_rejected_and_tally_unchanged() {
    let engines = engines();
    let proposal = open_for_voting(&engines);
    let at = proposal.schedule.unwrap().discussion_end;

    let err = engines
        .governance
        .record_vote(
            &proposal,
            Vote::new(proposal.id, "minnow", VoteChoice::For, dec!(50), at),
        )
        .unwrap_err();

    assert_eq!(
        err,
        VoteError::InsufficientVotingPower {
            required: dec!(100),
            supplied: dec!(50),
        }
    );
    assert_eq!(proposal.tally.total_votes, Decimal::ZERO);
    assert!(proposal.votes.is_empty());
}

#[test]
fn test_delegation_then_evolution() {
    let engines = engines();
    let master = Agent::new("Coordinator", "Technical", AgentType::Master).with_level(3);
    let subs = vec![
        Agent::new("Solidity Auditor", "Technical", AgentType::Sub).with_level(4),
        Agent::new("Backend Helper", "Technical", AgentType::Sub).with_level(2),
        Agent::new("Tutor", "Learning", AgentType::Sub).with_level(5),
    ];

    let plan = engines
        .matcher
        .plan_delegation(&master, "Review this smart contract code", &subs)
        .unwrap();
    assert_eq!(plan.analysis.domain, Domain::Technical);
    assert!(!plan.assignees.is_empty());
    assert!(plan.assignees.iter().all(|id| *id != subs[2].id));

    // credit the plan's XP, then pay for the next tier
    let grant = plan
        .grants
        .iter()
        .find(|g| g.agent_id == plan.assignees[0])
        .unwrap();
    let assignee = subs.iter().find(|a| a.id == grant.agent_id).unwrap();
    let award = engines.evolution.award_xp(assignee, grant.xp, t0());
    assert_eq!(award.agent.performance.tasks_completed, 1);

    let outcome = engines
        .evolution
        .apply_evolution(&award.agent, dec!(25), t0())
        .unwrap();
    assert!(outcome.new_level > outcome.previous_level);
    assert_eq!(outcome.dmt_spent, dec!(25));
}

#[test]
fn test_treasury_multisig_through_engines() {
    let engines = engines();
    let rules = engines.governance.treasury();
    let tx = TreasuryTransaction::new(
        TransactionType::Spending,
        dec!(8000),
        Currency::Dmt,
        "ecosystem-fund",
        t0(),
    )
    .with_description("Hackathon prizes");

    let guardian = SignerStanding {
        balance: dec!(40000),
        staked: dec!(15000),
        endorsements: 0,
    };
    let council = SignerStanding {
        balance: dec!(12000),
        staked: Decimal::ZERO,
        endorsements: 120,
    };

    // a council seat is not enough standing to sign as guardian
    let err = rules
        .approve(&tx, "council-1", TreasuryRole::Guardian, &council)
        .unwrap_err();
    assert_eq!(DecentraMindError::from(err).code(), "INELIGIBLE_APPROVER");

    let tx = rules
        .approve(&tx, "guardian-1", TreasuryRole::Guardian, &guardian)
        .unwrap();
    let tx = rules
        .approve(&tx, "guardian-2", TreasuryRole::Guardian, &guardian)
        .unwrap();
    let tx = rules
        .approve(&tx, "council-1", TreasuryRole::Council, &council)
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Approved);
    assert_eq!(
        rules.execute(&tx, t0()).unwrap().status,
        TransactionStatus::Executed
    );
}

#[test]
fn test_concurrent_votes_under_entity_lock() {
    let engines = Arc::new(engines());
    let proposal = open_for_voting(&engines);
    let id = proposal.id;
    let store = Arc::new(RwLock::new(proposal));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let engines = Arc::clone(&engines);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                engines.locks.with_lock(id, || {
                    let current = store.read().unwrap().clone();
                    let at = current.schedule.unwrap().discussion_end;
                    let vote =
                        Vote::new(id, format!("wallet-{}", i), VoteChoice::For, dec!(1000), at);
                    let updated = engines.governance.record_vote(&current, vote).unwrap();
                    *store.write().unwrap() = updated;
                });
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let final_state = store.read().unwrap();
    assert_eq!(final_state.votes.len(), 16);
    assert_eq!(final_state.tally.for_votes, dec!(16000));
    assert!(final_state.tally.is_consistent());
    assert!(engines.locks.release(&id));

    let metrics = GovernanceMetrics::from_proposals(std::slice::from_ref(&*final_state));
    assert_eq!(metrics.active_proposals, 1);
    assert_eq!(metrics.total_votes, dec!(16000));
}
