pub mod disabled;
pub mod openai_chat;
