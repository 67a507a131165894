use rand::{seq::SliceRandom, Rng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, proc_macros::AsText, proc_macros::Variants)]
pub enum TopicGroup {
    Space,
    Nature,
    History,
    Science,
    Geography,
    Culture,
}

impl TopicGroup {
    pub fn topics(&self) -> &'static [&'static str] {
        match self {
            TopicGroup::Space => &[
                "Black Holes",
                "Neutron Stars",
                "The Moon",
                "Mars",
                "Jupiter's Great Red Spot",
                "Saturn's Rings",
                "The Voyager Probes",
                "Exoplanets",
                "Comets",
                "The Sun",
                "Nebulae",
                "The Apollo Missions",
                "The International Space Station",
                "Dark Matter",
                "Galaxies",
            ],
            TopicGroup::Nature => &[
                "Octopuses",
                "Honey Bees",
                "Tardigrades",
                "Deep Sea Creatures",
                "Rainforests",
                "Coral Reefs",
                "Migratory Birds",
                "Fungi",
                "Giant Sequoias",
                "Bioluminescence",
                "Volcanoes",
                "Whales",
                "Carnivorous Plants",
                "Penguins",
                "Ant Colonies",
            ],
            TopicGroup::History => &[
                "Ancient Egypt",
                "The Roman Empire",
                "The Vikings",
                "The Silk Road",
                "Medieval Castles",
                "The Aztecs",
                "The Printing Press",
                "Samurai",
                "Pompeii",
                "The Great Wall of China",
                "The Library of Alexandria",
                "Ancient Greece",
                "The Black Death",
                "Pirates",
                "The Titanic",
            ],
            TopicGroup::Science => &[
                "Quantum Physics",
                "DNA",
                "The Human Brain",
                "Antibiotics",
                "Electricity",
                "Photosynthesis",
                "Chemistry of Colors",
                "Gravity",
                "The Periodic Table",
                "Vaccines",
                "Light",
                "Sound Waves",
                "The Human Heart",
                "Magnetism",
                "Sleep",
            ],
            TopicGroup::Geography => &[
                "The Sahara Desert",
                "Mount Everest",
                "The Amazon River",
                "Antarctica",
                "Iceland",
                "The Mariana Trench",
                "The Dead Sea",
                "Islands",
                "Glaciers",
                "Caves",
                "Lakes",
                "Canyons",
                "Volcanoes",
                "Deserts",
                "Waterfalls",
            ],
            TopicGroup::Culture => &[
                "Ancient Languages",
                "Musical Instruments",
                "Chess",
                "Tea",
                "Chocolate",
                "Festivals",
                "Architecture",
                "Mythology",
                "Cuisine",
                "Paintings",
                "Board Games",
                "Writing Systems",
                "Dance",
                "Coffee",
                "Ancient Egypt",
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topic {
    pub group: TopicGroup,
    pub label: &'static str,
}

/// Picks uniformly over every label of `groups`, so larger groups are not penalized.
/// An empty `groups` slice means the whole catalog.
pub fn pick_topic<R: Rng + ?Sized>(groups: &[TopicGroup], rng: &mut R) -> Topic {
    let groups = if groups.is_empty() {
        TopicGroup::ALL
    } else {
        groups
    };

    let all: Vec<Topic> = groups
        .iter()
        .flat_map(|group| {
            group.topics().iter().map(|label| Topic {
                group: *group,
                label: *label,
            })
        })
        .collect();

    // Every group carries a non-empty list.
    *all.choose(rng).unwrap_or(&Topic {
        group: TopicGroup::Nature,
        label: "Nature",
    })
}
