pub mod perception;
pub mod publish;
pub mod translation;
