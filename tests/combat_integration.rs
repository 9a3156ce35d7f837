//! Combat flow integration tests
//!
//! End-to-end battles through the public API: seeded full fights, the
//! singleton-session contract, escapes, and affinity application.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gloomspire::core::dice::ScriptedDice;
use gloomspire::core::types::{Affinity, CombatantId, Element};
use gloomspire::entity::{AffinityTable, CharacterStats, Combatant, CombatantStore, Skill};
use gloomspire::session::{
    CombatAction, CombatEndState, CombatEventKind, CombatSession, CombatState,
};

fn spawn(store: &mut CombatantStore, name: &str, hp: i32, strength: i32) -> CombatantId {
    store.insert(Combatant::new(
        name,
        CharacterStats {
            max_hp: hp,
            current_hp: hp,
            strength,
            ..CharacterStats::default()
        },
    ))
}

fn ended_with(session: &CombatSession) -> Vec<CombatEndState> {
    session
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            CombatEventKind::CombatEnded { end } => Some(end),
            _ => None,
        })
        .collect()
}

/// A seeded two-on-two brawl must run to a terminal state, emit exactly
/// one end event, and leave the session reset for the next battle.
#[test]
fn test_seeded_battle_runs_to_completion() {
    let mut store = CombatantStore::new();
    let party = vec![
        spawn(&mut store, "Hero", 140, 16),
        spawn(&mut store, "Ally", 120, 14),
    ];
    let enemies = vec![
        spawn(&mut store, "Slime", 60, 8),
        spawn(&mut store, "Imp", 50, 9),
    ];

    let mut session = CombatSession::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    session.start_combat(party.clone(), enemies.clone());

    let mut guard = 0;
    while session.is_active() {
        let target = session.enemies()[0];
        session.execute_action(&mut store, &mut rng, CombatAction::Attack { target });
        guard += 1;
        assert!(guard < 1000, "battle failed to terminate");
    }

    assert_eq!(session.state(), CombatState::Inactive);
    assert_eq!(ended_with(&session).len(), 1);
    assert!(session.party().is_empty());
    assert!(session.enemies().is_empty());

    // The store still owns every combatant; the session only borrowed them.
    for id in party.iter().chain(enemies.iter()) {
        assert!(store.get(*id).is_some());
    }
}

/// Starting a second battle while one is running is ignored; the running
/// session keeps its turn counter and rosters.
#[test]
fn test_session_is_a_singleton() {
    let mut store = CombatantStore::new();
    let party = vec![spawn(&mut store, "Hero", 100, 10)];
    let enemies = vec![spawn(&mut store, "Slime", 50, 8)];
    let intruders = vec![spawn(&mut store, "Ghoul", 80, 12)];

    let mut session = CombatSession::new();
    session.start_combat(party, enemies.clone());
    let turn_before = session.turn_number();

    session.start_combat(intruders, enemies);

    assert_eq!(session.turn_number(), turn_before);
    assert_eq!(session.party().len(), 1);
    assert_eq!(
        session
            .events()
            .iter()
            .filter(|e| matches!(e.kind, CombatEventKind::CombatStarted))
            .count(),
        1
    );
}

/// Rosters are handles: something outside the session may empty one, and
/// the next turn resolves the battle as a victory, exactly once.
#[test]
fn test_externally_emptied_roster_resolves_next_turn() {
    let mut store = CombatantStore::new();
    let party = vec![
        spawn(&mut store, "Hero", 100, 10),
        spawn(&mut store, "Ally", 100, 10),
    ];
    let enemies = vec![spawn(&mut store, "Slime", 50, 8)];

    let mut session = CombatSession::new();
    session.start_combat(party, enemies.clone());

    session.remove_participant(enemies[0]);
    assert!(session.is_active(), "removal alone does not end the battle");

    session.next_turn();

    assert_eq!(session.state(), CombatState::Inactive);
    assert_eq!(ended_with(&session), vec![CombatEndState::Victory]);
    assert!(store.get(enemies[0]).is_some());
}

/// Escape is a straight percent roll against a fixed 50% chance.
#[test]
fn test_escape_thresholds() {
    let mut store = CombatantStore::new();
    let party = vec![spawn(&mut store, "Hero", 100, 10)];
    let enemies = vec![spawn(&mut store, "Slime", 50, 8)];

    // 49.9 squeaks under the 50.0 bar.
    let mut session = CombatSession::new();
    session.start_combat(party.clone(), enemies.clone());
    let mut dice = ScriptedDice::new([49.9]);
    assert!(session.try_escape(&mut dice));
    assert_eq!(ended_with(&session), vec![CombatEndState::Escaped]);
    assert_eq!(session.state(), CombatState::Inactive);

    // 50.1 fails; the battle keeps going and nothing ended.
    let mut session = CombatSession::new();
    session.start_combat(party, enemies);
    let state_before = session.state();
    let mut dice = ScriptedDice::new([50.1]);
    assert!(!session.try_escape(&mut dice));
    assert!(session.is_active());
    assert_eq!(session.state(), state_before);
    assert!(ended_with(&session).is_empty());
}

/// The reference damage case flows through the whole pipeline: strength
/// 10, power 30, vitality 10, flat variance, no crit - 35 damage.
#[test]
fn test_reference_attack_through_session() {
    let mut store = CombatantStore::new();
    let party = vec![spawn(&mut store, "Hero", 100, 10)];
    let enemies = vec![spawn(&mut store, "Dummy", 200, 5)];

    let mut session = CombatSession::new();
    session.start_combat(party, enemies.clone());

    let mut dice = ScriptedDice::new([
        0.0, 1.0, 99.0, // hero: hit, flat variance, no crit
        0.0, 95.0, // enemy turn: target pick, miss
    ]);
    session.execute_action(
        &mut store,
        &mut dice,
        CombatAction::Attack { target: enemies[0] },
    );

    assert_eq!(store.get(enemies[0]).unwrap().stats.current_hp, 165);

    let dealt = session
        .events()
        .iter()
        .find_map(|e| match &e.kind {
            CombatEventKind::DamageDealt { result, .. } if result.hit => Some(*result),
            _ => None,
        })
        .expect("a hit was recorded");
    assert_eq!(dealt.damage, 35);
    assert!(!dealt.critical);
    assert_eq!(dealt.affinity, Affinity::Normal);
}

/// A sweep skill hits every enemy on the field with one action.
#[test]
fn test_sweep_skill_hits_the_whole_side() {
    let mut store = CombatantStore::new();
    let mage = store.insert(
        Combatant::new(
            "Seris",
            CharacterStats {
                magic: 20,
                ..CharacterStats::default()
            },
        )
        .with_skills(vec![Skill {
            id: "maragi".into(),
            display_name: "Maragi".into(),
            element: Element::Fire,
            base_power: 25,
            mp_cost: 10,
            accuracy: 100.0,
            targets_all: true,
        }]),
    );
    let enemies = vec![
        spawn(&mut store, "Slime A", 300, 8),
        spawn(&mut store, "Slime B", 300, 8),
    ];

    let mut session = CombatSession::new();
    session.start_combat(vec![mage], enemies.clone());

    let mut dice = ScriptedDice::new([
        0.0, 1.0, 99.0, // hit slime A: (25 + 20) - 5 = 40
        0.0, 1.0, 99.0, // hit slime B
        0.0, 0.0, 1.0, 99.0, // slime A retaliates: picks, hits
        0.0, 0.0, 1.0, 99.0, // slime B retaliates
    ]);
    session.execute_action(
        &mut store,
        &mut dice,
        CombatAction::Skill {
            skill_id: "maragi".into(),
            // The sweep ignores the nominated target and walks the roster.
            target: enemies[0],
        },
    );

    assert_eq!(store.get(enemies[0]).unwrap().stats.current_hp, 260);
    assert_eq!(store.get(enemies[1]).unwrap().stats.current_hp, 260);
    assert_eq!(store.get(mage).unwrap().stats.current_mp, 40);
}

/// Null absorbs the hit entirely; the damage event still reaches the UI.
#[test]
fn test_null_affinity_blocks_damage() {
    let mut store = CombatantStore::new();
    let party = vec![spawn(&mut store, "Hero", 100, 10)];
    let wisp = store.insert(
        Combatant::new(
            "Wisp",
            CharacterStats {
                max_hp: 60,
                current_hp: 60,
                ..CharacterStats::default()
            },
        )
        .with_affinities(AffinityTable::default().with(Element::Physical, Affinity::Null)),
    );

    let mut session = CombatSession::new();
    session.start_combat(party, vec![wisp]);

    let mut dice = ScriptedDice::new([
        0.0, 1.0, 99.0, // hero hits into the null
        0.0, 95.0, // wisp turn: pick, miss
    ]);
    session.execute_action(&mut store, &mut dice, CombatAction::Attack { target: wisp });

    assert_eq!(store.get(wisp).unwrap().stats.current_hp, 60);
    let nulled = session
        .events()
        .iter()
        .find_map(|e| match &e.kind {
            CombatEventKind::DamageDealt { result, .. } => Some(*result),
            _ => None,
        })
        .expect("the null hit was reported");
    assert!(nulled.hit);
    assert_eq!(nulled.damage, 0);
    assert_eq!(nulled.affinity, Affinity::Null);
}

/// Guard and Talk reach the event log so the presentation layer can show
/// them, and the acting order moves on.
#[test]
fn test_guard_and_talk_are_observable() {
    let mut store = CombatantStore::new();
    let party = vec![
        spawn(&mut store, "Hero", 100, 10),
        spawn(&mut store, "Ally", 100, 10),
    ];
    let enemies = vec![spawn(&mut store, "Slime", 400, 1)];

    let mut session = CombatSession::new();
    session.start_combat(party, enemies);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    session.execute_action(&mut store, &mut rng, CombatAction::Guard);
    session.execute_action(&mut store, &mut rng, CombatAction::Talk);

    let noted: Vec<_> = session
        .events()
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                CombatEventKind::GuardRaised { .. } | CombatEventKind::TalkAttempted { .. }
            )
        })
        .collect();
    assert_eq!(noted.len(), 2);
}

/// Turn order is the party in given order, then the enemies in given
/// order.
#[test]
fn test_turn_order_is_party_then_enemies() {
    let mut store = CombatantStore::new();
    let party = vec![
        spawn(&mut store, "Hero", 100, 10),
        spawn(&mut store, "Ally", 100, 10),
    ];
    let enemies = vec![
        spawn(&mut store, "Slime", 50, 8),
        spawn(&mut store, "Imp", 50, 8),
    ];

    let mut session = CombatSession::new();
    session.start_combat(party.clone(), enemies.clone());

    let expected: Vec<CombatantId> = party.into_iter().chain(enemies).collect();
    assert_eq!(session.turn_order(), expected.as_slice());
}
