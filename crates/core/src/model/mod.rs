mod catalog;
mod history;
mod ids;
mod partition;
mod question;
mod settings;

pub use ids::{ItemId, ParseIdError};

pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use history::{DEFAULT_HISTORY_SIZE, PickHistory};
pub use partition::{MasteryPartition, Pool, PoolSizes, PoolTransition};
pub use question::{Direction, Question, QuestionView};
pub use settings::{PoolWeights, QuizSettings, SettingsError};
