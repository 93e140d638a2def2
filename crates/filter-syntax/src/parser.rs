use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "filter.pest"]
pub struct FilterParser;
