pub mod health;
pub mod matches;
pub mod rounds;
pub mod routes;
pub mod users;
