pub mod assemble;
pub mod document;
pub mod draft;
pub mod extract;
pub mod features;
pub mod http_client;
pub mod mappings;
pub mod persist;
pub mod player;
pub mod record;
pub mod team_context;
