mod options;
mod parse;
