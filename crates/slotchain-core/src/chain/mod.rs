//! Static pipeline - コンパイル時の関数合成
//!
//! `compose(f, g)` / `f | g` / `f.then(g)` は `g(f(x))` を計算する 1 つの
//! [`Step`] を作ります。`f` の出力型と `g` の入力型が一致しない合成は
//! コンパイルエラーになります（実行時の型情報は使いません）。
//!
//! [`StaticSlot`](crate::runtime::StaticSlot) で Runtime Pipeline の
//! 1 リンクとして埋め込めます。

pub mod pipeline;
pub mod step;

pub use self::pipeline::{Pipeline, compose};
pub use self::step::{Slot, Step, make_slot};
