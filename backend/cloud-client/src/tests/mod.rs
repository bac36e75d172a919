mod credentials;
mod support;
