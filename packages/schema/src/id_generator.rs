use uuid::Uuid;

/// Sequential ID generator for modules and columns within a document
///
/// IDs have the form `{seed}-{n}`. A random seed keeps ids from separate
/// editing sessions apart; a fixed seed gives reproducible ids in tests.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        let mut seed = Uuid::new_v4().simple().to_string();
        seed.truncate(8);
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
