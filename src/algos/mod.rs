pub use self::affinity::Affinity;
pub use self::greedy::{Greedy, Weights};
pub use self::loads::Loads;

mod affinity;
mod greedy;
mod loads;
