pub mod answer;
pub mod record_type;

pub use answer::{AnswerRecord, LOCAL_RECORD_TTL};
pub use record_type::{QueryKind, RecordType};
