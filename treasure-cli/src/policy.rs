use treasure_game::{Command, GameSession, Item};

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next menu command for the current town.
    fn next_command(&mut self, session: &GameSession) -> Command;
}

/// Built-in strategies for simulated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Never picks a fight; gives up when stranded
    Cautious,
    /// Brawls for gold when it cannot afford the next tool
    Brawler,
}

impl Strategy {
    pub fn create_policy(self) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Cautious => Box::new(TravelPolicy::new(false)),
            Self::Brawler => Box::new(TravelPolicy::new(true)),
        }
    }
}

/// Buys what the terrain needs, hunts, digs up to twice, then moves on.
struct TravelPolicy {
    brawls: bool,
    town_index: u32,
    digs_here: u8,
}

const DIGS_PER_TOWN: u8 = 2;

impl TravelPolicy {
    const fn new(brawls: bool) -> Self {
        Self {
            brawls,
            town_index: 0,
            digs_here: 0,
        }
    }

    fn affordable(session: &GameSession, item: Item) -> bool {
        session
            .town()
            .shop()
            .price_of(item)
            .is_some_and(|price| price <= session.hunter().gold())
    }
}

impl PlayerPolicy for TravelPolicy {
    fn name(&self) -> &'static str {
        if self.brawls { "brawler" } else { "cautious" }
    }

    fn next_command(&mut self, session: &GameSession) -> Command {
        if session.towns_visited() != self.town_index {
            self.town_index = session.towns_visited();
            self.digs_here = 0;
        }
        let hunter = session.hunter();
        let town = session.town();
        let needed = town.terrain().needed_item();
        let kit_has_room = hunter.empty_position_in_kit().is_some();

        if !hunter.has_item_in_kit(needed) && kit_has_room && Self::affordable(session, needed) {
            return Command::Buy(needed.label().to_string());
        }
        if !town.hunted() {
            return Command::Hunt;
        }
        if !hunter.has_item_in_kit(Item::Shovel)
            && kit_has_room
            && Self::affordable(session, Item::Shovel)
        {
            return Command::Buy(Item::Shovel.label().to_string());
        }
        if hunter.has_item_in_kit(Item::Shovel) && !town.searched() && self.digs_here < DIGS_PER_TOWN {
            self.digs_here += 1;
            return Command::Dig;
        }
        if hunter.has_item_in_kit(needed) {
            return Command::Move;
        }
        if self.brawls {
            return Command::LookForTrouble;
        }
        Command::Exit
    }
}
