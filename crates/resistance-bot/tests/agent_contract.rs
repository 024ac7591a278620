use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use resistance_bot::{Agent, AgentError, AgentOptions, BayesAgent};
use resistance_core::model::player::PlayerId;
use resistance_core::model::rules::GameRules;
use std::collections::HashSet;

fn ids(raw: &[u8]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId::new).collect()
}

fn seeded_agent(seed: u64) -> BayesAgent {
    BayesAgent::new("bayes", GameRules::standard(), AgentOptions::new(Some(seed), false))
}

fn assert_valid_team(team: &[PlayerId], size: usize, me: PlayerId, player_count: usize) {
    assert_eq!(team.len(), size, "team {team:?} should have {size} players");
    let distinct: HashSet<_> = team.iter().copied().collect();
    assert_eq!(distinct.len(), size, "team {team:?} repeats a player");
    assert!(team.contains(&me), "team {team:?} leaves out {me}");
    assert!(team.iter().all(|player| player.index() < player_count));
}

#[test]
fn fifth_vote_is_forced_after_four_minority_votes() {
    let mut agent = seeded_agent(1);
    agent.new_game(5, PlayerId::new(0), &[]).unwrap();

    // Resistance-sized team without us: rejected on its merits.
    let mission = ids(&[1, 2, 3]);
    assert!(!agent.vote(&mission, PlayerId::new(1)));

    for _ in 0..4 {
        agent.vote_outcome(&mission, PlayerId::new(1), &ids(&[1, 2]));
    }
    assert_eq!(agent.session().unwrap().tracker().vote_failures(), 4);
    assert!(agent.vote(&mission, PlayerId::new(1)));
}

#[test]
fn forced_mission_does_not_force_the_next_one() {
    let mut agent = seeded_agent(9);
    agent.new_game(5, PlayerId::new(4), &[]).unwrap();

    let first = ids(&[0, 1]);
    for _ in 0..5 {
        agent.vote_outcome(&first, PlayerId::new(0), &ids(&[0]));
    }
    agent.mission_outcome(&first, PlayerId::new(0), 1, false).unwrap();
    agent.round_outcome(1, 1);
    assert_eq!(agent.session().unwrap().tracker().vote_failures(), 0);

    // Player 0 is now a suspect; their first proposal of the new mission is judged on merit.
    assert!(!agent.vote(&ids(&[0, 4]), PlayerId::new(0)));
}

#[test]
fn majority_vote_resets_failure_counter() {
    let mut agent = seeded_agent(2);
    agent.new_game(6, PlayerId::new(3), &[]).unwrap();
    let mission = ids(&[0, 1]);

    agent.vote_outcome(&mission, PlayerId::new(0), &ids(&[0]));
    agent.vote_outcome(&mission, PlayerId::new(0), &ids(&[0, 1]));
    assert_eq!(agent.session().unwrap().tracker().vote_failures(), 2);

    // Exactly half the table counts as approval.
    agent.vote_outcome(&mission, PlayerId::new(0), &ids(&[0, 1, 2]));
    assert_eq!(agent.session().unwrap().tracker().vote_failures(), 0);
}

#[test]
fn proposals_are_valid_for_reachable_states() {
    let rules = GameRules::standard();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for player_count in 5..=10 {
        let spy_count = rules.spy_count(player_count).unwrap();
        for trial in 0..6u64 {
            let mut seating: Vec<PlayerId> = PlayerId::all(player_count).collect();
            seating.shuffle(&mut rng);
            let spies: Vec<PlayerId> = seating[..spy_count].to_vec();
            let me = seating[rng.gen_range(0..player_count)];
            let known: Vec<PlayerId> = if spies.contains(&me) {
                spies.clone()
            } else {
                Vec::new()
            };

            let mut agent = seeded_agent(trial);
            agent.new_game(player_count, me, &known).unwrap();

            for mission_index in 0..5 {
                let size = rules.mission_size(player_count, mission_index).unwrap();
                let required = rules.fails_required(player_count, mission_index).unwrap();
                for team_size in 1..=player_count {
                    let team = agent.propose_mission(team_size, required).unwrap();
                    assert_valid_team(&team, team_size, me, player_count);
                }

                let mut mission: Vec<PlayerId> = PlayerId::all(player_count).collect();
                mission.shuffle(&mut rng);
                mission.truncate(size);
                let spies_on_mission = mission.iter().filter(|p| spies.contains(p)).count();
                let betrayals = rng.gen_range(0..=spies_on_mission);
                agent
                    .mission_outcome(&mission, mission[0], betrayals, betrayals < required)
                    .unwrap();
                assert!(agent.session().unwrap().belief().is_normalized());
            }
        }
    }
}

#[test]
fn vote_never_fails_on_malformed_input() {
    let mut agent = seeded_agent(3);
    agent.new_game(7, PlayerId::new(2), &[]).unwrap();
    let inputs = [
        (ids(&[]), PlayerId::new(0)),
        (ids(&[0, 0, 1]), PlayerId::new(1)),
        (ids(&[0, 9]), PlayerId::new(1)),
        (ids(&[0, 1]), PlayerId::new(15)),
    ];
    for (mission, proposer) in &inputs {
        let _: bool = agent.vote(mission, *proposer);
    }
    assert!(!agent.vote(&ids(&[0, 0, 1]), PlayerId::new(1)));
}

#[test]
fn spy_waits_for_partner_on_two_fail_mission() {
    let mut agent = seeded_agent(4);
    let me = PlayerId::new(1);
    agent.new_game(7, me, &ids(&[1, 4, 6])).unwrap();

    assert!(agent.betray(&ids(&[0, 1]), PlayerId::new(0)).unwrap());

    agent.round_outcome(3, 1);
    assert!(!agent.betray(&ids(&[0, 1, 2, 3]), PlayerId::new(0)).unwrap());
    assert!(agent.betray(&ids(&[0, 1, 2, 4]), PlayerId::new(0)).unwrap());

    agent.round_outcome(4, 2);
    assert!(agent.betray(&ids(&[0, 1, 2, 3]), PlayerId::new(0)).unwrap());
}

#[test]
fn resistance_never_betrays() {
    let mut agent = seeded_agent(5);
    agent.new_game(5, PlayerId::new(0), &[]).unwrap();
    assert!(!agent.betray(&ids(&[0, 1, 2]), PlayerId::new(1)).unwrap());
}

#[test]
fn spy_without_threshold_table_is_refused() {
    let mut rules = GameRules::standard();
    rules.fails_required.remove(&6);
    let mut agent = BayesAgent::new("bayes", rules, AgentOptions::new(Some(6), false));

    let err = agent.new_game(6, PlayerId::new(0), &ids(&[0, 5])).unwrap_err();
    assert_eq!(
        err,
        AgentError::MissingConfiguration {
            player_count: 6,
            mission_index: 0
        }
    );
    assert!(agent.new_game(6, PlayerId::new(0), &[]).is_ok());
}

#[test]
fn full_game_as_resistance() {
    let mut agent = seeded_agent(7);
    let me = PlayerId::new(4);
    agent.new_game(5, me, &[]).unwrap();
    assert_eq!(agent.name(), "bayes");

    // Mission 1 fails with player 0 and 1 aboard.
    let first = ids(&[0, 1]);
    agent.vote(&first, PlayerId::new(0));
    agent.vote_outcome(&first, PlayerId::new(0), &ids(&[0, 1, 2]));
    agent.mission_outcome(&first, PlayerId::new(0), 1, false).unwrap();
    agent.round_outcome(1, 1);

    let suspicion = agent.session().unwrap().suspicion();
    assert!(suspicion.above_average(PlayerId::new(0)));
    assert!(suspicion.above_average(PlayerId::new(1)));
    assert!(!suspicion.above_average(PlayerId::new(2)));

    // A team with a suspect proposed by a suspect is turned down.
    assert!(!agent.vote(&ids(&[0, 2, 3]), PlayerId::new(0)));

    // Our own proposal avoids both suspects.
    let team = agent.propose_mission(3, 1).unwrap();
    assert_valid_team(&team, 3, me, 5);
    assert!(!team.contains(&PlayerId::new(0)));
    assert!(!team.contains(&PlayerId::new(1)));

    agent.vote_outcome(&team, me, &ids(&[2, 3, 4]));
    agent.mission_outcome(&team, me, 0, true).unwrap();
    agent.round_outcome(2, 1);
    assert_eq!(agent.session().unwrap().tracker().mission_index(), 2);

    agent.game_outcome(true, &ids(&[0, 1]));
    assert!(agent.session().is_none());
}

#[test]
fn full_game_as_spy() {
    let mut agent = seeded_agent(8);
    let me = PlayerId::new(2);
    agent.new_game(5, me, &ids(&[2, 4])).unwrap();

    // Never send the whole cell together.
    assert!(!agent.vote(&ids(&[2, 4]), PlayerId::new(0)));

    let team = agent.propose_mission(2, 1).unwrap();
    assert_valid_team(&team, 2, me, 5);
    assert!(!team.contains(&PlayerId::new(4)));

    agent.vote_outcome(&team, me, &ids(&[0, 1, 2]));
    assert!(agent.betray(&team, me).unwrap());
    agent.mission_outcome(&team, me, 1, false).unwrap();

    let snapshot = agent.snapshot().unwrap();
    let restored = snapshot.restore().unwrap();
    assert!(restored.is_normalized());

    agent.game_outcome(true, &ids(&[2, 4]));
    assert_eq!(agent.propose_mission(2, 1), Err(AgentError::NotStarted));
}

#[test]
fn decision_logging_does_not_change_play() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    let play = |decision_logs: bool| {
        let mut agent = BayesAgent::new(
            "logged",
            GameRules::standard(),
            AgentOptions::new(Some(21), decision_logs),
        );
        agent.new_game(6, PlayerId::new(0), &ids(&[0, 3])).unwrap();
        let team = agent.propose_mission(2, 1).unwrap();
        let approve = agent.vote(&ids(&[1, 2]), PlayerId::new(1));
        agent.vote_outcome(&ids(&[1, 2]), PlayerId::new(1), &ids(&[1, 2, 4]));
        let betray = agent.betray(&team, PlayerId::new(0)).unwrap();
        agent
            .mission_outcome(&team, PlayerId::new(0), usize::from(betray), !betray)
            .unwrap();
        let snapshot = agent.snapshot().unwrap();
        agent.game_outcome(true, &ids(&[0, 3]));
        (team, approve, betray, snapshot)
    };

    let quiet = play(false);
    let logged = tracing::subscriber::with_default(subscriber, || play(true));
    assert_eq!(quiet, logged);
}
