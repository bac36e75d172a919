mod auth;
mod client;
mod helpers;
mod transport;
