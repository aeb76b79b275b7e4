/// Reusable iced widgets for the three app surfaces

pub mod widgets;
