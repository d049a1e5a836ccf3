pub mod reader;
pub use reader::{LineReader, StdioReader, StreamReader};

cfg_if::cfg_if! {
    if #[cfg(feature = "line-editor")] {
        pub use reader::EditorReader;
    }
}

pub mod terminal;
pub use terminal::{PromptError, Terminal, input_float, input_int, input_string};
