pub mod order_system;
