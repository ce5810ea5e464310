pub mod deinflect;
pub mod dictionary;
pub mod preprocess;
pub mod state;
pub mod translator;
pub mod types;

pub use deinflect::Deinflector;
pub use dictionary::{DictionaryIndex, KanjiDictData, TermDef, TermDictData};
pub use state::LoadState;
pub use translator::Translator;
pub use types::{DeinflectRule, Deinflection, Interpretation, KanjiEntry, TermEntry, TermResolution};
