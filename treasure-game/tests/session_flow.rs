use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use treasure_game::{
    Command, Difficulty, GameConfig, GameSession, GameStatus, HuntOutcome, Hunter, Item,
    LeaveOutcome, Shop, Terrain, TerrainKind, Town, TownRules, TroubleOutcome, TurnOutcome,
};

const TOOLS: [&str; 6] = ["water", "rope", "machete", "boots", "horse", "boat"];

fn rich_easy_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.profiles.easy.starting_gold = 1_000;
    cfg
}

fn script() -> Vec<Command> {
    vec![
        Command::Buy("shovel".into()),
        Command::Buy("rope".into()),
        Command::Explore,
        Command::LookForTrouble,
        Command::Dig,
        Command::Hunt,
        Command::Move,
        Command::LookForTrouble,
        Command::Sell("rope".into()),
        Command::Dig,
        Command::Hunt,
        Command::Move,
    ]
}

fn transcript(seed: u64) -> Vec<String> {
    let mut game = GameSession::new("wren", Difficulty::Normal, GameConfig::default(), seed);
    let mut lines = vec![game.town().latest_news().to_string()];
    for command in script() {
        lines.push(game.apply(command).message);
        lines.push(game.hunter().info_string());
    }
    lines
}

#[test]
fn same_seed_replays_identically() {
    for seed in [1, 42, 0xDEAD_BEEF] {
        assert_eq!(transcript(seed), transcript(seed));
    }
}

#[test]
fn different_seeds_diverge_somewhere() {
    let transcripts: Vec<_> = (0..8).map(transcript).collect();
    assert!(transcripts.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn third_treasure_wins_exactly_once() {
    let mut game = GameSession::new("wren", Difficulty::Easy, rich_easy_config(), 2024);
    for tool in TOOLS {
        let turn = game.apply(Command::Buy(tool.to_string()));
        assert!(matches!(turn.outcome, TurnOutcome::Shop(ref s) if s.is_success()));
    }

    let mut wins = 0;
    for _ in 0..500 {
        let hunt = game.apply(Command::Hunt);
        if matches!(
            hunt.outcome,
            TurnOutcome::Hunt(HuntOutcome::Found {
                completes_set: true,
                ..
            })
        ) {
            wins += 1;
        }
        if game.status().is_over() {
            break;
        }
        let moved = game.apply(Command::Move);
        assert!(matches!(moved.outcome, TurnOutcome::Leave(leave) if leave.departed()));
    }

    assert_eq!(wins, 1);
    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.hunter().has_all_treasures());
    let treasures = game.summary().treasures;
    assert_eq!(treasures.len(), 3);
    assert!(treasures.iter().all(|t| t.is_collectible()));
    assert_ne!(treasures[0], treasures[1]);
    assert_ne!(treasures[1], treasures[2]);
    assert_ne!(treasures[0], treasures[2]);

    let after = game.apply(Command::Hunt);
    assert_eq!(after.outcome, TurnOutcome::GameOver(GameStatus::Won));
}

#[test]
fn broke_brawler_loses_the_game() {
    let mut cfg = GameConfig::default();
    cfg.profiles.hard.starting_gold = 0;
    cfg.profiles.hard.trouble_chance_tough = 1.0;
    cfg.profiles.hard.trouble_chance_mild = 1.0;
    cfg.validate().unwrap();

    let mut game = GameSession::new("wren", Difficulty::Hard, cfg, 5);
    let turn = game.apply(Command::LookForTrouble);
    assert_eq!(turn.outcome, TurnOutcome::Trouble(TroubleOutcome::Bankrupt));
    assert_eq!(turn.status, GameStatus::Lost);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.hunter().gold(), 0);
}

#[test]
fn gold_stays_non_negative_through_many_brawls() {
    let mut game = GameSession::new("wren", Difficulty::Hard, GameConfig::default(), 99);
    for _ in 0..200 {
        let before = game.hunter().gold();
        let turn = game.apply(Command::LookForTrouble);
        if let TurnOutcome::Trouble(TroubleOutcome::Lost { stake, paid }) = turn.outcome {
            assert_eq!(paid, stake.min(before));
            assert_eq!(game.hunter().gold(), before - paid);
            assert!(turn.message.contains(&format!("pay {paid} gold")));
        }
        if game.status().is_over() {
            assert_eq!(game.status(), GameStatus::Lost);
            break;
        }
    }
}

#[test]
fn duplicate_purchase_never_changes_state() {
    let mut game = GameSession::new("wren", Difficulty::Normal, GameConfig::default(), 8);
    let _ = game.apply(Command::Buy("boots".into()));
    let snapshot = game.hunter().clone();
    let again = game.apply(Command::Buy("Boots".into()));
    assert!(matches!(again.outcome, TurnOutcome::Shop(ref s) if !s.is_success()));
    assert_eq!(game.hunter(), &snapshot);
}

#[test]
fn mountains_block_a_boat_owner() {
    let cfg = GameConfig::default();
    let profile = cfg.profile(Difficulty::Normal);
    let shop = Shop::new(profile.markdown, &cfg.catalog, Difficulty::Normal);
    let rules = TownRules::from_profile(profile, &cfg.payouts);
    let mut town = Town::with_terrain(shop, Terrain::new(TerrainKind::Mountains), rules, false);

    let mut hunter = Hunter::new("wren", 30, 7);
    assert!(hunter.buy_item(Item::Boat, 20).is_bought());
    let before = hunter.clone();

    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let outcome = town.leave_town(&mut hunter, &mut rng);
    assert_eq!(outcome, LeaveOutcome::Blocked { needed: Item::Rope });
    assert_eq!(hunter, before);
}

#[test]
fn towns_reset_their_one_shot_flags() {
    let mut game = GameSession::new("wren", Difficulty::Test, GameConfig::default(), 13);
    let _ = game.apply(Command::Hunt);
    assert!(game.town().hunted());
    let moved = game.apply(Command::Move);
    assert!(matches!(moved.outcome, TurnOutcome::Leave(leave) if leave.departed()));
    assert!(!game.town().hunted());
    assert!(!game.town().searched());
}
