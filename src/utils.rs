pub mod clonecell;
pub mod copyhashmap;
pub mod errorfmt;
pub mod numcell;
pub mod oserror;
pub mod syncqueue;
