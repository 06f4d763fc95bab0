//! Engine benchmarks
//!
//! Run with: cargo bench -p decentramind

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use decentramind::common::{Agent, AgentType, ProposalType, VoteChoice, VoteTally};
use decentramind::governance::ProposalInput;
use decentramind::matcher::classify;
use decentramind::{DecentraMindConfig, Engines};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TASKS: [&str; 4] = [
    "Help me create a fitness plan",
    "Review this smart contract code for reentrancy",
    "Draft a marketing strategy for our launch",
    "What should I cook tonight",
];

fn engines() -> Engines {
    Engines::new(DecentraMindConfig::default()).unwrap()
}

fn agent_pool(size: usize) -> Vec<Agent> {
    let domains = ["Technical", "Health & Wellness", "Business", "Learning", "Creative"];
    (0..size)
        .map(|i| {
            Agent::new(format!("agent-{}", i), domains[i % domains.len()], AgentType::Sub)
                .with_level(1 + (i % 20) as u32)
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(TASKS.len() as u64));

    group.bench_function("tasks", |b| {
        b.iter(|| {
            for task in TASKS {
                black_box(classify(black_box(task)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_match_agents(c: &mut Criterion) {
    let engines = engines();
    let mut group = c.benchmark_group("match_agents");

    for size in [10, 100, 1000] {
        let pool = agent_pool(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("pool", size), &pool, |b, pool| {
            b.iter(|| {
                let outcome = engines
                    .matcher
                    .match_agents(black_box(TASKS[1]), pool)
                    .unwrap();
                black_box(outcome.agents().len())
            })
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let engines = engines();
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let input = ProposalInput {
        title: "Adjust staking rewards".to_string(),
        description: "Lower the staking APY to 10% and route the difference to grants."
            .to_string(),
        creator_wallet: "bench-wallet".to_string(),
        proposal_type: ProposalType::EconomicPolicy,
        funding: None,
        tags: Vec::new(),
    };
    let mut proposal = engines
        .governance
        .create_proposal(input, dec!(5000), at)
        .unwrap();
    let mut tally = VoteTally::default();
    tally.add(VoteChoice::For, dec!(80000000)).unwrap();
    tally.add(VoteChoice::Against, dec!(20000000)).unwrap();
    tally.add(VoteChoice::Abstain, dec!(5000000)).unwrap();
    proposal.tally = tally;

    c.bench_function("resolve", |b| {
        b.iter(|| {
            black_box(
                engines
                    .governance
                    .resolve(black_box(&proposal), black_box(dec!(700000000))),
            )
        })
    });
}

fn bench_apply_evolution(c: &mut Criterion) {
    let engines = engines();
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("apply_evolution");

    for agent_type in [AgentType::Master, AgentType::Sub] {
        let agent = Agent::new("bench-agent", "Technical", agent_type);
        let amount = Decimal::from(100);
        group.bench_with_input(
            BenchmarkId::new("first_tier", agent_type.to_string()),
            &agent,
            |b, agent| {
                b.iter(|| {
                    black_box(
                        engines
                            .evolution
                            .apply_evolution(black_box(agent), amount, at)
                            .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_match_agents,
    bench_resolve,
    bench_apply_evolution
);
criterion_main!(benches);
