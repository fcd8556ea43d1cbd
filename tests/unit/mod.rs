mod auth;
mod dashboard;
mod lifecycle;
mod permissions;
mod router;
mod validation;
