pub(crate) mod daily;
pub(crate) mod manage;
pub(crate) mod overview;
pub(crate) mod salary;
pub(crate) mod savings;
