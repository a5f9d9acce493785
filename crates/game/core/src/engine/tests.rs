use std::sync::Arc;

use super::*;
use crate::definitions::{CharacterDefinition, EnemyTemplate, WaveDefinition};
use crate::element::Element;
use crate::env::DefinitionSet;
use crate::skill::{SkillDefinition, SkillModifier};
use crate::stats::BaseStats;

fn hero_stats() -> BaseStats {
    BaseStats {
        attack_activation_interval: 0.5,
        ..BaseStats::default()
    }
}

fn definitions() -> DefinitionSet {
    DefinitionSet::new(CombatConfig {
        crit_chance: 0.0,
        ultimate_crit_chance: 0.0,
        ..CombatConfig::default()
    })
    .with_skill(
        SkillDefinition::builder("jab", SkillCategory::Attack)
            .damage(100.0)
            .build(),
    )
    .and_then(|set| {
        set.with_skill(
            SkillDefinition::builder("spark", SkillCategory::Attack)
                .damage(5.0)
                .unique()
                .build(),
        )
    })
    .and_then(|set| {
        set.with_skill(
            SkillDefinition::builder("nova", SkillCategory::Ultimate)
                .damage(40.0)
                .cooldown(1.0)
                .ultimate(5.0, 3.0)
                .build(),
        )
    })
    .and_then(|set| {
        set.with_enemy(EnemyTemplate {
            speed: 0.0,
            xp_reward: 100.0,
            coin_reward: 3,
            ..EnemyTemplate::new("slime")
        })
    })
    .and_then(|set| {
        set.with_enemy(EnemyTemplate {
            speed: 0.0,
            contact_damage: 1_000.0,
            ..EnemyTemplate::new("brute")
        })
    })
    .and_then(|set| {
        set.with_character(CharacterDefinition::new("hero", hero_stats()).with_skill("jab"))
    })
    .and_then(|set| set.with_character(CharacterDefinition::new("monk", hero_stats())))
    .and_then(|set| {
        set.with_stage(
            StageDefinition::new("meadow", 2.0)
                .with_wave(WaveDefinition::new(0.0, "slime", 1, 3.0))
                .with_next("caves"),
        )
    })
    .and_then(|set| set.with_stage(StageDefinition::new("caves", 60.0)))
    .and_then(|set| {
        set.with_stage(
            StageDefinition::new("pit", 60.0).with_wave(WaveDefinition::new(0.0, "brute", 1, 0.0)),
        )
    })
    .expect("valid definitions")
}

fn simulation() -> Simulation {
    Simulation::new(SimulationContext::new(Arc::new(definitions())).with_seed(11))
}

fn run_for(sim: &mut Simulation, ticks: usize, dt: f32) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(sim.tick(dt).expect("tick"));
    }
    events
}

#[test]
fn start_run_grants_starting_skills() {
    let mut sim = simulation();
    let events = sim.start_run("hero", "meadow").expect("start");
    assert_eq!(
        events,
        vec![CombatEvent::SkillAcquired {
            skill: "jab".into(),
            category: SkillCategory::Attack,
        }]
    );
    assert!(sim.is_running());
    assert_eq!(sim.player().expect("player").loadout.attack().len(), 1);
}

#[test]
fn unknown_records_are_rejected() {
    let mut sim = simulation();
    assert!(matches!(
        sim.start_run("ghost", "meadow"),
        Err(EngineError::UnknownCharacter(_))
    ));
    assert!(matches!(
        sim.start_run("hero", "void"),
        Err(EngineError::UnknownStage(_))
    ));
    assert!(matches!(sim.tick(0.1), Err(EngineError::NoActiveRun)));
    assert_eq!(
        sim.handle(Command::ActivateUltimate),
        Err(CommandError::NoActiveRun)
    );
}

#[test]
fn second_start_while_running_is_rejected() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");
    assert!(matches!(
        sim.start_run("hero", "meadow"),
        Err(EngineError::RunInProgress)
    ));
}

#[test]
fn invalid_delta_is_rejected() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");
    assert!(matches!(sim.tick(-1.0), Err(EngineError::InvalidDelta(_))));
    assert!(matches!(sim.tick(f32::NAN), Err(EngineError::InvalidDelta(_))));
}

#[test]
fn kill_grants_xp_coins_level_and_offer() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");

    // first tick spawns the wave, second tick's passive attack kills it
    let events = run_for(&mut sim, 2, 0.5);

    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::EnemyKilled { template, coins: 3, .. } if template == "slime"
    )));
    assert!(events.contains(&CombatEvent::LevelUp { level: 2 }));
    let mut offer = events
        .iter()
        .find_map(|e| match e {
            CombatEvent::SkillOffer { choices } => Some(choices.clone()),
            _ => None,
        })
        .expect("offer after level-up");
    offer.sort();
    assert_eq!(offer, vec!["jab", "nova", "spark"]);

    let player = sim.player().expect("player");
    assert_eq!(player.stats.level(), 2);
    assert!(sim.enemies().expect("roster").is_empty());
    assert_eq!(sim.store().get_int("level"), Some(2));
    assert_eq!(sim.store().get_int("coins"), Some(3));
}

#[test]
fn acquiring_from_offer_clears_it() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");
    run_for(&mut sim, 2, 0.5);
    assert!(!sim.offer().is_empty());

    let events = sim
        .handle(Command::AcquireSkill("spark".into()))
        .expect("acquire");
    assert_eq!(
        events,
        vec![CombatEvent::SkillAcquired {
            skill: "spark".into(),
            category: SkillCategory::Attack,
        }]
    );
    assert!(sim.offer().is_empty());

    let events = sim
        .handle(Command::AcquireSkill("spark".into()))
        .expect("rejection is not an error");
    assert!(matches!(
        &events[..],
        [CombatEvent::AcquisitionRejected { skill, .. }] if skill == "spark"
    ));
    assert_eq!(
        sim.handle(Command::AcquireSkill("nope".into())),
        Err(CommandError::UnknownSkill("nope".into()))
    );
}

#[test]
fn stage_clears_after_duration_and_unlocks_next() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");
    let events = run_for(&mut sim, 4, 0.5);

    assert!(events.contains(&CombatEvent::StageCleared {
        stage: "meadow".into(),
        next_stage: Some("caves".into()),
    }));
    assert_eq!(
        sim.outcome(),
        Some(&RunOutcome::Cleared {
            next_stage: Some("caves".into())
        })
    );
    assert!(sim.profile().expect("profile").is_stage_unlocked("caves"));
    assert_eq!(sim.store().get_int("stage_unlocked.caves"), Some(1));

    assert!(sim.tick(0.5).expect("finished run ticks").is_empty());
    assert_eq!(
        sim.handle(Command::ToggleSkill(0)),
        Err(CommandError::RunFinished)
    );
}

#[test]
fn contact_damage_can_kill_the_player() {
    let mut sim = simulation();
    sim.start_run("monk", "pit").expect("start");
    let events = sim.tick(0.1).expect("tick");

    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::PlayerDamaged { .. })));
    assert!(matches!(
        events.last(),
        Some(CombatEvent::PlayerDied { level: 1, .. })
    ));
    assert_eq!(sim.outcome(), Some(&RunOutcome::Died));
    assert!(sim.player().expect("player").stats.is_dead());

    let summary = sim.end_run().expect("end");
    assert_eq!(summary.outcome, RunOutcome::Died);
    assert!(!sim.is_running());
}

#[test]
fn ultimate_charges_and_activates_through_commands() {
    let mut sim = simulation();
    sim.start_run("monk", "meadow").expect("start");
    assert_eq!(
        sim.handle(Command::ActivateUltimate),
        Err(CommandError::Ultimate(UltimateError::NotEquipped))
    );

    sim.handle(Command::AcquireSkill("nova".into()))
        .expect("acquire");
    assert!(matches!(
        sim.handle(Command::ActivateUltimate),
        Err(CommandError::Ultimate(UltimateError::NotReady { .. }))
    ));

    let events = run_for(&mut sim, 2, 0.5);
    assert!(events.contains(&CombatEvent::UltimateReady {
        skill: "nova".into()
    }));

    let events = sim.handle(Command::ActivateUltimate).expect("ready");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::UltimateActivated { skill, targets: 1, .. } if skill == "nova"
    )));
    let ultimate = sim
        .player()
        .expect("player")
        .loadout
        .ultimate()
        .expect("equipped");
    assert_eq!(ultimate.charge_time(), 0.0);
    assert!(!ultimate.is_ready());
}

#[test]
fn toggled_off_ultimate_stops_charging() {
    let mut sim = simulation();
    sim.start_run("monk", "caves").expect("start");
    sim.handle(Command::AcquireSkill("nova".into()))
        .expect("acquire");

    // the ultimate follows the (empty) passive skills in toggle order
    sim.handle(Command::ToggleSkill(0)).expect("toggle");
    run_for(&mut sim, 4, 0.5);
    let ultimate = sim
        .player()
        .expect("player")
        .loadout
        .ultimate()
        .expect("equipped");
    assert_eq!(ultimate.charge_time(), 0.0);
    assert_eq!(
        sim.handle(Command::ActivateUltimate),
        Err(CommandError::Ultimate(UltimateError::Inactive("nova".into())))
    );

    sim.handle(Command::ToggleSkill(0)).expect("toggle back");
    run_for(&mut sim, 2, 0.5);
    assert!(sim.handle(Command::ActivateUltimate).is_ok());
}

#[test]
fn modifiers_toggles_and_element_changes() {
    let mut sim = simulation();
    sim.start_run("hero", "caves").expect("start");

    let events = sim
        .handle(Command::ApplyModifier(
            SkillModifier::new("sharpen", "jab").with_damage(2.0),
        ))
        .expect("modifier");
    assert_eq!(
        events,
        vec![CombatEvent::ModifierAcquired {
            modifier: "sharpen".into(),
            target: "jab".into(),
            affected: 1,
        }]
    );
    assert!(matches!(
        sim.handle(Command::ApplyModifier(
            SkillModifier::new("broken", "jab").with_cooldown_reduction(1.5)
        )),
        Err(CommandError::InvalidModifier(_))
    ));

    sim.handle(Command::ToggleSkill(0)).expect("toggle");
    assert!(!sim.player().expect("player").loadout.attack()[0].is_active());
    assert_eq!(
        sim.handle(Command::ToggleSkill(5)),
        Err(CommandError::InvalidSkillIndex { index: 5, count: 1 })
    );

    sim.handle(Command::ChangeElement(Element::Ice))
        .expect("element");
    assert_eq!(sim.player().expect("player").stats.element(), Element::Ice);
}

#[test]
fn movement_moves_the_player() {
    let mut sim = simulation();
    sim.start_run("monk", "caves").expect("start");
    sim.handle(Command::SetMovement(Vec2::new(2.0, 0.0)))
        .expect("move");
    sim.tick(1.0).expect("tick");
    let player = sim.player().expect("player");
    assert_eq!(player.position(), Vec2::new(5.0, 0.0));
    assert_eq!(
        sim.handle(Command::SetMovement(Vec2::new(f32::INFINITY, 0.0))),
        Err(CommandError::InvalidMovement)
    );
}

#[test]
fn end_run_saves_and_resets() {
    let mut sim = simulation();
    sim.start_run("hero", "meadow").expect("start");
    run_for(&mut sim, 2, 0.5);
    let summary = sim.end_run().expect("end");

    assert_eq!(summary.outcome, RunOutcome::Abandoned);
    assert_eq!(summary.kills, 1);
    assert_eq!(summary.coins, 3);
    assert_eq!(summary.level, 2);
    assert!(summary.damage_dealt > 0.0);
    assert_eq!(summary.skills, vec!["jab".to_string()]);
    assert_eq!(sim.store().get_int("best_level"), Some(2));
    assert!(matches!(sim.end_run(), Err(EngineError::NoActiveRun)));

    // coins persist across runs
    sim.start_run("hero", "meadow").expect("restart");
    assert_eq!(sim.profile().expect("profile").coins, 3);
}

#[test]
fn same_seed_replays_identically() {
    let play = || {
        let mut sim = simulation();
        sim.start_run("hero", "meadow").expect("start");
        run_for(&mut sim, 4, 0.5)
    };
    assert_eq!(play(), play());
}
