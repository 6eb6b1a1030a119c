// Declarations
mod contract_wrapper;
mod event;
mod function_declaration;
mod mapping;
pub(crate) mod variable_declaration;

// Statements
mod bare_call;
mod return_statement;
mod semicolon;

// Structure
mod unbalanced_parens;

// Use the whole document
mod undefined_variable;

pub(crate) use contract_wrapper::placeholder;
pub(crate) use function_declaration::{MODIFIERS, clarity_header};
pub(crate) use return_statement::ok_response;

pub use bare_call::bare_function_call;
pub use contract_wrapper::contract_wrapper;
pub use event::event_declaration;
pub use function_declaration::function_declaration;
pub use mapping::mapping_declaration;
pub use return_statement::return_statement;
pub use semicolon::unnecessary_semicolon;
pub use unbalanced_parens::unbalanced_parens;
pub use undefined_variable::{SENTINEL, is_defined, undefined_variable};
pub use variable_declaration::variable_declaration;
