pub mod higher_lower;
