//! Card catalogue for definition lookup.
//!
//! The `CardCatalog` stores every card definition a match can reference,
//! including tokens created by effects. `CardCatalog::standard()` builds the
//! built-in set; the matching handlers are registered by
//! `EffectRegistry::standard()`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, Rarity, SecretTrigger, TargetRule};

/// Well-known card identities of the built-in set.
pub mod ids {
    use super::CardId;

    // === Units ===
    pub const RECRUIT: CardId = CardId::new(1);
    pub const SHIELDBEARER: CardId = CardId::new(2);
    pub const RIVER_RAPTOR: CardId = CardId::new(3);
    pub const ARGENT_SQUIRE: CardId = CardId::new(4);
    pub const WOLF_RIDER: CardId = CardId::new(5);
    pub const OGRE_BRUTE: CardId = CardId::new(6);
    pub const FIRE_IMP: CardId = CardId::new(7);
    pub const FROST_SPRITE: CardId = CardId::new(8);
    pub const NOVICE_SCRIBE: CardId = CardId::new(9);
    pub const SPELLWEAVER: CardId = CardId::new(10);
    pub const LOOT_GOBLIN: CardId = CardId::new(11);
    pub const EMBER_PHOENIX: CardId = CardId::new(12);
    pub const PHOENIX_EMBER: CardId = CardId::new(13);
    pub const TREASURE_GOBLIN: CardId = CardId::new(14);
    pub const CURSED_REVENANT: CardId = CardId::new(16);
    pub const MARTYR_OF_DAWN: CardId = CardId::new(17);
    pub const CARRION_HOUND: CardId = CardId::new(18);
    pub const VAMPIRE_BAT: CardId = CardId::new(19);
    pub const MANA_LEECH: CardId = CardId::new(20);
    pub const GLACIAL_GOLEM: CardId = CardId::new(21);
    pub const STORM_HARPY: CardId = CardId::new(22);
    pub const BLIND_OGRE: CardId = CardId::new(23);
    pub const GIANT_SLAYER: CardId = CardId::new(24);
    pub const SIEGE_RAM: CardId = CardId::new(25);
    pub const TIMID_MONK: CardId = CardId::new(26);
    pub const BONE_COLOSSUS: CardId = CardId::new(27);
    pub const HEALING_SPRING: CardId = CardId::new(28);
    pub const BATTLE_RAGER: CardId = CardId::new(29);
    pub const SPIKED_TORTOISE: CardId = CardId::new(30);
    pub const HOLY_CHAMPION: CardId = CardId::new(31);
    pub const LOYAL_DEFENDER: CardId = CardId::new(32);

    // === Spells ===
    pub const THE_COIN: CardId = CardId::new(100);
    pub const FIREBOLT: CardId = CardId::new(101);
    pub const PYROCLASM: CardId = CardId::new(102);
    pub const HEALING_LIGHT: CardId = CardId::new(103);
    pub const FROST_NOVA: CardId = CardId::new(104);
    pub const FLAMESTRIKE: CardId = CardId::new(105);
    pub const ARCANE_INSIGHT: CardId = CardId::new(106);
    pub const HOLY_NOVA: CardId = CardId::new(107);
    pub const MIND_CONTROL: CardId = CardId::new(108);
    pub const WHIRLWIND: CardId = CardId::new(109);
    pub const GOLD_CACHE: CardId = CardId::new(110);
    pub const FROSTBOLT: CardId = CardId::new(111);

    // === Secrets ===
    pub const COUNTERSPELL: CardId = CardId::new(200);
    pub const VAPORIZE: CardId = CardId::new(201);
    pub const EXPLOSIVE_TRAP: CardId = CardId::new(202);
    pub const SNIPE: CardId = CardId::new(203);
    pub const MIRROR_ENTITY: CardId = CardId::new(204);
    pub const NOBLE_SACRIFICE: CardId = CardId::new(205);
}

/// Catalogue of card definitions.
///
/// ## Example
///
/// ```
/// use hearthfire::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::spell(CardId::new(1), "Firebolt", 1));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Firebolt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Display name, or a placeholder for unknown ids.
    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        self.cards.get(&id).map_or("Unknown Card", |c| c.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Look a card up by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.values().find(|c| c.name == name)
    }

    /// Cards that may appear in a constructed deck.
    pub fn collectible(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(|c| !c.token)
    }

    /// The built-in card set.
    #[must_use]
    pub fn standard() -> Self {
        use ids::*;

        let mut c = Self::new();

        // Plain bodies
        c.register(
            CardDefinition::unit(RECRUIT, "Recruit", 1, 1, 1)
                .token()
                .with_rarity(Rarity::Free),
        );
        c.register(
            CardDefinition::unit(SHIELDBEARER, "Shieldbearer", 1, 1, 3)
                .taunt()
                .with_text("Taunt"),
        );
        c.register(
            CardDefinition::unit(RIVER_RAPTOR, "River Raptor", 2, 3, 2)
                .with_rarity(Rarity::Free),
        );
        c.register(
            CardDefinition::unit(ARGENT_SQUIRE, "Argent Squire", 1, 1, 1)
                .divine_shield()
                .with_text("Divine Shield"),
        );
        c.register(
            CardDefinition::unit(WOLF_RIDER, "Wolf Rider", 3, 3, 1)
                .charge()
                .with_text("Charge"),
        );
        c.register(CardDefinition::unit(OGRE_BRUTE, "Ogre Brute", 6, 6, 7));
        c.register(
            CardDefinition::unit(STORM_HARPY, "Storm Harpy", 4, 3, 4)
                .windfury()
                .with_text("May attack twice each turn."),
        );
        c.register(
            CardDefinition::unit(HOLY_CHAMPION, "Holy Champion", 4, 3, 3)
                .taunt()
                .divine_shield()
                .with_rarity(Rarity::Rare)
                .with_text("Taunt. Divine Shield"),
        );
        c.register(CardDefinition::unit(LOYAL_DEFENDER, "Loyal Defender", 1, 2, 1).token());

        // Battlecries
        c.register(
            CardDefinition::unit(FIRE_IMP, "Fire Imp", 2, 2, 2)
                .with_text("On play: deal 2 damage to the enemy hero."),
        );
        c.register(
            CardDefinition::unit(FROST_SPRITE, "Frost Sprite", 3, 2, 3)
                .with_text("On play: freeze a random enemy unit."),
        );
        c.register(
            CardDefinition::unit(NOVICE_SCRIBE, "Novice Scribe", 2, 1, 2)
                .with_text("On play: draw a card."),
        );

        // Reactive growth
        c.register(
            CardDefinition::unit(SPELLWEAVER, "Spellweaver", 2, 1, 3)
                .grows_on_spell()
                .with_rarity(Rarity::Rare)
                .with_text("Whenever you cast a spell, gain +1 attack."),
        );
        c.register(
            CardDefinition::unit(CARRION_HOUND, "Carrion Hound", 2, 1, 3)
                .grows_on_death()
                .with_text("Whenever a unit dies, gain +1 attack."),
        );

        // Deathrattles
        c.register(
            CardDefinition::unit(LOOT_GOBLIN, "Loot Goblin", 2, 2, 1)
                .with_text("On death: draw a card."),
        );
        c.register(
            CardDefinition::unit(EMBER_PHOENIX, "Ember Phoenix", 4, 4, 3)
                .with_rarity(Rarity::Epic)
                .with_text("On death: return as a 2/1 Phoenix Ember."),
        );
        c.register(CardDefinition::unit(PHOENIX_EMBER, "Phoenix Ember", 2, 2, 1).token());
        c.register(
            CardDefinition::unit(TREASURE_GOBLIN, "Treasure Goblin", 3, 2, 3)
                .with_text("On death: shuffle a Gold Cache into your deck."),
        );
        c.register(
            CardDefinition::unit(CURSED_REVENANT, "Cursed Revenant", 3, 5, 4)
                .cursed()
                .with_rarity(Rarity::Epic)
                .with_text("Takes a second hit in combat. On death: deal 3 damage to your hero."),
        );
        c.register(
            CardDefinition::unit(MARTYR_OF_DAWN, "Martyr of Dawn", 5, 3, 5)
                .with_rarity(Rarity::Legendary)
                .with_text("On death: restore your hero to full health."),
        );
        c.register(
            CardDefinition::unit(GLACIAL_GOLEM, "Glacial Golem", 4, 3, 5)
                .with_text("On death: freeze a random enemy unit."),
        );

        // Combat modifiers
        c.register(
            CardDefinition::unit(VAMPIRE_BAT, "Vampire Bat", 3, 3, 3)
                .with_text("Heals your hero for the damage it deals."),
        );
        c.register(
            CardDefinition::unit(MANA_LEECH, "Mana Leech", 4, 3, 4)
                .with_rarity(Rarity::Rare)
                .with_text("Gain mana equal to the damage it deals."),
        );
        c.register(
            CardDefinition::unit(BLIND_OGRE, "Blind Ogre", 3, 5, 5)
                .blind(50)
                .with_text("50% chance to miss when attacking a hero."),
        );
        c.register(
            CardDefinition::unit(GIANT_SLAYER, "Giant Slayer", 4, 2, 5)
                .double_damage()
                .with_text("Deals double damage to units."),
        );
        c.register(
            CardDefinition::unit(SIEGE_RAM, "Siege Ram", 3, 2, 4)
                .hero_damage(2)
                .with_text("Deals 2 extra damage to heroes."),
        );
        c.register(
            CardDefinition::unit(TIMID_MONK, "Timid Monk", 2, 3, 3)
                .hero_damage(-2)
                .with_text("Deals 2 less damage to heroes."),
        );
        c.register(
            CardDefinition::unit(BATTLE_RAGER, "Battle Rager", 3, 2, 4)
                .with_text("Whenever it attacks, gain +1 attack."),
        );
        c.register(
            CardDefinition::unit(SPIKED_TORTOISE, "Spiked Tortoise", 2, 1, 4)
                .taunt()
                .with_text("Taunt. When attacked, deal 1 damage to the attacker."),
        );
        c.register(
            CardDefinition::unit(HEALING_SPRING, "Healing Spring", 3, 0, 4)
                .with_text("At the start of your turn, restore 2 health to your hero."),
        );
        c.register(
            CardDefinition::unit(BONE_COLOSSUS, "Bone Colossus", 10, 8, 8)
                .scales_with_deaths()
                .with_rarity(Rarity::Legendary)
                .with_text("Costs 1 less for each unit that died this match."),
        );

        // Spells
        c.register(
            CardDefinition::spell(THE_COIN, "The Coin", 0)
                .token()
                .with_text("Gain 1 mana crystal this turn only."),
        );
        c.register(
            CardDefinition::spell(FIREBOLT, "Firebolt", 1)
                .targets(TargetRule::AnyCharacter)
                .burns_target(3)
                .with_text("Deal 3 damage."),
        );
        c.register(
            CardDefinition::spell(PYROCLASM, "Pyroclasm", 6)
                .burns_face(6)
                .with_rarity(Rarity::Rare)
                .with_text("Deal 6 damage to the enemy hero."),
        );
        c.register(
            CardDefinition::spell(HEALING_LIGHT, "Healing Light", 3)
                .with_text("Restore 8 health to your hero."),
        );
        c.register(
            CardDefinition::spell(FROST_NOVA, "Frost Nova", 3)
                .with_text("Freeze all enemy units."),
        );
        c.register(
            CardDefinition::spell(FLAMESTRIKE, "Flamestrike", 7)
                .with_text("Deal 4 damage to all enemy units."),
        );
        c.register(
            CardDefinition::spell(ARCANE_INSIGHT, "Arcane Insight", 3)
                .with_text("Draw 2 cards."),
        );
        c.register(
            CardDefinition::spell(HOLY_NOVA, "Holy Nova", 5)
                .burns_face(2)
                .with_text(
                    "Deal 2 damage to all enemies. Restore 2 health to all friendly characters.",
                ),
        );
        c.register(
            CardDefinition::spell(MIND_CONTROL, "Mind Control", 10)
                .targets(TargetRule::EnemyUnit)
                .with_rarity(Rarity::Epic)
                .with_text("Take control of an enemy unit."),
        );
        c.register(
            CardDefinition::spell(WHIRLWIND, "Whirlwind", 1)
                .with_text("Deal 1 damage to all units."),
        );
        c.register(
            CardDefinition::spell(GOLD_CACHE, "Gold Cache", 0)
                .token()
                .with_text("Draw a card."),
        );
        c.register(
            CardDefinition::spell(FROSTBOLT, "Frostbolt", 2)
                .targets(TargetRule::AnyCharacter)
                .burns_target(3)
                .with_text("Deal 3 damage and freeze a unit."),
        );

        // Secrets
        c.register(
            CardDefinition::secret(COUNTERSPELL, "Counterspell", 3, SecretTrigger::SpellPlayed)
                .with_rarity(Rarity::Rare)
                .with_text("Secret: counter the next enemy spell."),
        );
        c.register(
            CardDefinition::secret(VAPORIZE, "Vaporize", 3, SecretTrigger::HeroAttack)
                .with_rarity(Rarity::Rare)
                .with_text("Secret: when a unit attacks your hero, destroy it."),
        );
        c.register(
            CardDefinition::secret(EXPLOSIVE_TRAP, "Explosive Trap", 2, SecretTrigger::HeroAttack)
                .with_text("Secret: when your hero is attacked, deal 2 damage to all enemies."),
        );
        c.register(
            CardDefinition::secret(SNIPE, "Snipe", 2, SecretTrigger::UnitPlayed)
                .with_text("Secret: after your opponent plays a unit, deal 4 damage to it."),
        );
        c.register(
            CardDefinition::secret(MIRROR_ENTITY, "Mirror Entity", 3, SecretTrigger::UnitPlayed)
                .with_rarity(Rarity::Rare)
                .with_text("Secret: after your opponent plays a unit, summon a copy of it."),
        );
        c.register(
            CardDefinition::secret(NOBLE_SACRIFICE, "Noble Sacrifice", 1, SecretTrigger::HeroAttack)
                .with_text(
                    "Secret: when an enemy attacks, summon a 2/1 Defender as the new target.",
                ),
        );

        c
    }
}
