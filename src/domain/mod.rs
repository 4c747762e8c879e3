pub mod reference;
pub mod ticket;
pub mod verdict;
