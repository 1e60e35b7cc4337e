//! Resume upload and ingestion.
//! Flow: multipart extract → extension check → persist → parser service → profile merge.

pub mod handlers;
pub mod ingest;
pub mod parser;
pub mod upload;
