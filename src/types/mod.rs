// Types layer - database entities, API DTOs and internal domain types
pub mod db;
pub mod dto;
pub mod internal;
