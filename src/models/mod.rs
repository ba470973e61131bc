mod category;
mod expense;
mod salary;
mod savings;

pub use category::Category;
pub use expense::{Expense, NewExpense};
pub use salary::{Salary, SalaryUpdate};
pub use savings::{Savings, SavingsUpdate};

#[cfg(test)]
mod tests;
