pub mod observable;
pub mod partition;
pub mod value;

pub use observable::{ListenerId, Observable, WeakObservable};
pub use partition::{Partition, ValueAccessor};
pub use value::{AxisValue, PartitionValue};
