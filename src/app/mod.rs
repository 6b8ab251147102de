mod controller;

pub use controller::AppController;
