//! Headless Crawl Runner
//!
//! Walks a party through a corridor of random encounters and auto-plays
//! every battle, then prints a JSON summary. Useful for tuning encounter
//! pacing and damage numbers without a frontend.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use gloomspire::core::types::{Affinity, CombatantId, Element};
use gloomspire::encounter::{EncounterConfig, EncounterData, EncounterEngine};
use gloomspire::entity::{AffinityTable, CharacterStats, Combatant, CombatantStore, Skill};
use gloomspire::session::{CombatAction, CombatEndState, CombatEventKind, CombatSession};

/// Headless crawl runner - walk, fight, report
#[derive(Parser, Debug)]
#[command(name = "crawl_runner")]
#[command(about = "Auto-play random encounters and print a pacing report")]
struct Args {
    /// Steps to walk before stopping
    #[arg(long, default_value_t = 500)]
    steps: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of travel time per step (drives timed encounter disables)
    #[arg(long, default_value_t = 0.5)]
    step_seconds: f32,

    /// Print every combat event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct CrawlReport {
    seed: u64,
    steps_walked: u64,
    encounters: u32,
    victories: u32,
    defeats: u32,
    escapes: u32,
    turns_fought: u32,
    party_survivors: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut store = CombatantStore::new();
    let party = create_party(&mut store);

    let mut engine = EncounterEngine::new(EncounterConfig::default());
    engine.set_area_encounters(corridor_encounters());

    let mut session = CombatSession::new();
    let mut report = CrawlReport {
        seed,
        steps_walked: 0,
        encounters: 0,
        victories: 0,
        defeats: 0,
        escapes: 0,
        turns_fought: 0,
        party_survivors: party.len(),
    };

    for _ in 0..args.steps {
        engine.update(args.step_seconds);
        report.steps_walked += 1;

        let Some(encounter) = engine.check_for_encounter(&mut rng) else {
            continue;
        };
        report.encounters += 1;

        let enemies = spawn_encounter(&mut store, &encounter, &mut rng);
        let living_party: Vec<CombatantId> = party
            .iter()
            .copied()
            .filter(|id| store.get(*id).is_some_and(|c| !c.is_downed()))
            .collect();

        session.start_combat(living_party, enemies);
        let (end, turns) = auto_play(&mut session, &mut store, &mut rng, args.verbose);
        report.turns_fought += turns;
        match end {
            Some(CombatEndState::Victory) => report.victories += 1,
            Some(CombatEndState::Defeat) => report.defeats += 1,
            Some(CombatEndState::Escaped) => report.escapes += 1,
            None => {}
        }

        if matches!(end, Some(CombatEndState::Defeat)) {
            break;
        }

        // Patch the survivors up a little between fights; the downed stay down.
        for id in &party {
            if let Some(member) = store.get_mut(*id) {
                if !member.is_downed() {
                    member.stats.heal(10);
                    member.stats.restore_mp(5);
                }
            }
        }
    }

    report.party_survivors = party
        .iter()
        .filter(|id| store.get(**id).is_some_and(|c| !c.is_downed()))
        .count();

    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
}

/// Drives one battle to its end state and counts the turns it took; the
/// party swings weapons until someone is desperate enough to run.
fn auto_play(
    session: &mut CombatSession,
    store: &mut CombatantStore,
    rng: &mut StdRng,
    verbose: bool,
) -> (Option<CombatEndState>, u32) {
    let mut end = None;
    let mut turns = 0;
    let mut note_events =
        |session: &mut CombatSession, end: &mut Option<CombatEndState>, turns: &mut u32| {
            for event in session.drain_events() {
                if verbose {
                    eprintln!("  [turn {}] {}", event.turn, event.description);
                }
                match event.kind {
                    CombatEventKind::CombatEnded { end: state } => *end = Some(state),
                    CombatEventKind::TurnChanged {
                        is_player_turn: true,
                    } => *turns += 1,
                    _ => {}
                }
            }
        };

    // Enemy turns run inside execute_action, so driving the player side
    // is enough to push a battle to completion.
    while session.is_active() {
        let desperate = session.party().iter().all(|id| {
            store
                .get(*id)
                .is_some_and(|c| c.stats.current_hp * 4 < c.stats.max_hp)
        });
        if desperate {
            session.execute_action(store, rng, CombatAction::Escape);
            if session.is_active() {
                // Failed escape forfeits the rest of the turn.
                session.next_turn();
            }
        } else {
            let enemies = session.enemies().to_vec();
            let Some(&target) = enemies.first() else {
                session.next_turn();
                continue;
            };
            session.execute_action(store, rng, CombatAction::Attack { target });
        }

        note_events(session, &mut end, &mut turns);
    }

    note_events(session, &mut end, &mut turns);
    (end, turns)
}

fn create_party(store: &mut CombatantStore) -> Vec<CombatantId> {
    let fighter = Combatant::new(
        "Aldric",
        CharacterStats {
            max_hp: 140,
            current_hp: 140,
            strength: 16,
            vitality: 13,
            ..CharacterStats::default()
        },
    )
    .with_skills(vec![Skill::new("cleave", "Cleave", Element::Physical)
        .with_power(45)
        .with_mp_cost(6)
        .with_accuracy(85.0)]);

    let mage = Combatant::new(
        "Seris",
        CharacterStats {
            max_hp: 90,
            current_hp: 90,
            magic: 18,
            vitality: 8,
            ..CharacterStats::default()
        },
    )
    .with_affinities(AffinityTable::default().with(Element::Fire, Affinity::Resist))
    .with_skills(vec![
        Skill::new("agi", "Agi", Element::Fire).with_power(35).with_mp_cost(4),
        Skill::new("zio", "Zio", Element::Electric)
            .with_power(35)
            .with_mp_cost(4),
    ]);

    vec![store.insert(fighter), store.insert(mage)]
}

fn corridor_encounters() -> Vec<EncounterData> {
    vec![
        EncounterData::new("slime-pack", vec!["slime".into()], 3.0).with_count(1, 3),
        EncounterData::new("imp-ambush", vec!["imp".into(), "slime".into()], 1.5).with_count(2, 4),
        EncounterData::new("ghoul-lair", vec!["ghoul".into()], 0.5).with_count(1, 2),
    ]
}

/// The spawner half of the loop: turns a composition into live combatants.
fn spawn_encounter(
    store: &mut CombatantStore,
    encounter: &EncounterData,
    rng: &mut StdRng,
) -> Vec<CombatantId> {
    use gloomspire::core::dice::Dice;

    let span = (encounter.max_enemies - encounter.min_enemies) as usize;
    let count = encounter.min_enemies as usize + if span > 0 { rng.index(span + 1) } else { 0 };

    (0..count.max(1))
        .map(|_| {
            let kind = &encounter.enemy_kinds[rng.index(encounter.enemy_kinds.len())];
            store.insert(enemy_of_kind(kind))
        })
        .collect()
}

fn enemy_of_kind(kind: &str) -> Combatant {
    match kind {
        "imp" => Combatant::new(
            "Imp",
            CharacterStats {
                max_hp: 45,
                current_hp: 45,
                magic: 12,
                agility: 14,
                ..CharacterStats::default()
            },
        )
        .with_affinities(AffinityTable::default().with(Element::Fire, Affinity::Null))
        .with_skills(vec![Skill::new("agi", "Agi", Element::Fire)
            .with_power(30)
            .with_mp_cost(4)]),
        "ghoul" => Combatant::new(
            "Ghoul",
            CharacterStats {
                max_hp: 80,
                current_hp: 80,
                strength: 14,
                ..CharacterStats::default()
            },
        )
        .with_affinities(
            AffinityTable::default()
                .with(Element::Dark, Affinity::Drain)
                .with(Element::Light, Affinity::Weak),
        ),
        _ => Combatant::new(
            "Slime",
            CharacterStats {
                max_hp: 35,
                current_hp: 35,
                strength: 8,
                vitality: 6,
                ..CharacterStats::default()
            },
        )
        .with_affinities(AffinityTable::default().with(Element::Physical, Affinity::Resist)),
    }
}
