//! One module per API area. Each adds `build_*` methods to `YclientsClient`
//! and the matching dispatching methods to `Yclients`.

pub mod booking;
mod clients;
mod companies;
mod records;
mod services;
mod staff;
mod user;
