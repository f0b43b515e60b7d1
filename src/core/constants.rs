// Stat derivation
pub const MODIFIER_BASELINE: u32 = 12;
pub const PHYSICAL_ATTACK_FACTOR: f64 = 1.5;
pub const PHYSICAL_DEFENSE_FACTOR: f64 = 1.5;
pub const MAGIC_ATTACK_FACTOR: f64 = 1.75;
pub const MAGIC_DEFENSE_FACTOR: f64 = 1.75;

// Rolls
pub const NATURAL_MISS: u32 = 1;
pub const NATURAL_HIT: u32 = 20;
pub const HIT_THRESHOLD_BASE: i64 = 10;
pub const DEFAULT_THREAT_RANGE: u32 = 20;
pub const DEFAULT_CRIT_MULTIPLIER: u32 = 2;
pub const MONSTER_MAGIC_ROLL_THRESHOLD: u32 = 16;
pub const MONSTER_BASE_DEXTERITY: u32 = 10;

// Monster scaling
pub const DEFAULT_STATS_MODIFIER: u32 = 150;
pub const SCALED_HP_FLOOR: u32 = 8;
pub const SCALED_STAT_FLOOR: u32 = 1;

// Rewards
pub const DEFAULT_EXP_MODIFIER: u32 = 100;
pub const DEFAULT_REWARD_MODIFIER: u32 = 100;
pub const DEFAULT_EXP_MIN: u32 = 5;
pub const DEFAULT_EXP_MAX: u32 = 15;
pub const DEFAULT_REWARD_MIN: u32 = 3;
pub const DEFAULT_REWARD_MAX: u32 = 12;
pub const REWARD_LEVEL_DIFF_THRESHOLD: i64 = 1;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const MIN_HP_GAIN_PER_LEVEL: u32 = 1;

// Characters
pub const DEFAULT_DAILY_BATTLES: u32 = 30;
pub const NEUTRAL_ELEMENT: u32 = 0;

// Battles
pub const DEFAULT_MAX_IDLE_MINUTES: i64 = 30;
