mod lists;
mod paragraphs;
mod round_trip;
mod tables;
