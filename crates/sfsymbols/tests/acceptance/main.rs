mod support;

mod check;
mod completions;
mod expand;
mod generate;
