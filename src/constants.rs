// GITHUB WEBHOOK HEADERS
pub const GITHUB_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
pub const GITHUB_PUSH_EVENT: &str = "push";

pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Awarded when assignment metadata carries no max point value.
pub const DEFAULT_MAX_POINTS: i32 = 15;

/// Fraction of the max awarded for a late submission.
pub const LATE_PENALTY_FACTOR: f64 = 0.5;

// SUBMISSION FOLDERS
//
// Versioned with the course content: order matters, earlier entries win when
// a commit touches more than one folder.
pub const SUBMISSION_FOLDERS: [&str; 8] = [
    "day-01-agent-foundations",
    "day-02-agentic-framework",
    "day-03-multi-agent",
    "day-04-team-challenge",
    "day-05-mvp",
    "homework/day-01",
    "homework/day-02",
    "homework/day-03",
];

// ACHIEVEMENT CODES
pub const FIRST_BLOOD: &str = "first_blood";
pub const STREAK_3: &str = "streak_3";
pub const STREAK_5: &str = "streak_5";
pub const EARLY_BIRD: &str = "early_bird";
pub const NIGHT_OWL: &str = "night_owl";

pub const EARLY_BIRD_BEFORE_HOUR: u32 = 9;
pub const NIGHT_OWL_FROM_HOUR: u32 = 22;

// TUTOR SESSION LIMITS
pub const PROGRAM_DAY_MIN: i32 = 1;
pub const PROGRAM_DAY_MAX: i32 = 25;
pub const DEPTH_SCORE_MIN: i32 = 1;
pub const DEPTH_SCORE_MAX: i32 = 5;

// ROLE EXPO
pub const ROLE_CODES: [&str; 7] = [
    "AI-PM", "FDE", "AI-SE", "AI-DA", "AI-DS", "AI-SEC", "AI-FE",
];

pub const INTERACTION_TYPES: [&str; 3] = ["mini_challenge", "ai_tutor", "reflection"];

/// Size of the full role catalog as the progress check counts it. The
/// enumerated vocabulary above only carries 7 codes, so the completion flag
/// stays false until an eighth role ships.
pub const ROLE_CATALOG_SIZE: usize = 8;
