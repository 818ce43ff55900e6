pub mod archive;
pub mod crx_server;
