pub mod fix_code_blocks;
pub mod register_languages;
