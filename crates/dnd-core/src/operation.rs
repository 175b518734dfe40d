//! Operation negotiation
//!
//! Maps between the browser's `effectAllowed` / `dropEffect` vocabulary and
//! the [`DataPackageOperation`] flag set used by the drag/drop manager.
//!
//! Native tokens: <https://developer.mozilla.org/en-US/docs/Web/API/DataTransfer/effectAllowed#values>

use bitflags::bitflags;

bitflags! {
    /// Effects a drop may produce.
    ///
    /// 放置操作可能产生的效果。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DataPackageOperation: u32 {
        const NONE = 0;
        const COPY = 1 << 0;
        const MOVE = 1 << 1;
        const LINK = 1 << 2;
    }
}

impl DataPackageOperation {
    /// Parses a native operation token, ignoring case.
    ///
    /// An absent token, `all` and `uninitialized` allow every operation.
    /// Unrecognised tokens allow none.
    pub fn from_native(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::all();
        };

        const TOKENS: [(&str, DataPackageOperation); 9] = [
            ("none", DataPackageOperation::NONE),
            ("copy", DataPackageOperation::COPY),
            (
                "copyLink",
                DataPackageOperation::COPY.union(DataPackageOperation::LINK),
            ),
            (
                "copyMove",
                DataPackageOperation::COPY.union(DataPackageOperation::MOVE),
            ),
            ("link", DataPackageOperation::LINK),
            (
                "linkMove",
                DataPackageOperation::LINK.union(DataPackageOperation::MOVE),
            ),
            ("move", DataPackageOperation::MOVE),
            ("all", DataPackageOperation::all()),
            ("uninitialized", DataPackageOperation::all()),
        ];

        TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map_or(Self::NONE, |(_, operation)| *operation)
    }

    /// Converts to the single native token the browser accepts as `dropEffect`.
    ///
    /// When several flags are set the precedence is link, then copy, then
    /// move, the same order used to pick the drag cursor glyph.
    pub fn to_native(self) -> &'static str {
        if self.contains(Self::LINK) {
            "link"
        } else if self.contains(Self::COPY) {
            "copy"
        } else if self.contains(Self::MOVE) {
            "move"
        } else {
            "none"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COPY: DataPackageOperation = DataPackageOperation::COPY;
    const MOVE: DataPackageOperation = DataPackageOperation::MOVE;
    const LINK: DataPackageOperation = DataPackageOperation::LINK;

    #[test]
    fn native_tokens_map_to_flags() {
        let cases = [
            (Some("none"), DataPackageOperation::NONE),
            (Some("copy"), COPY),
            (Some("copyLink"), COPY | LINK),
            (Some("copyMove"), COPY | MOVE),
            (Some("link"), LINK),
            (Some("linkMove"), LINK | MOVE),
            (Some("move"), MOVE),
            (Some("all"), COPY | MOVE | LINK),
            (Some("uninitialized"), COPY | MOVE | LINK),
            (None, COPY | MOVE | LINK),
            (Some("teleport"), DataPackageOperation::NONE),
            (Some(""), DataPackageOperation::NONE),
        ];

        for (token, expected) in cases {
            assert_eq!(
                DataPackageOperation::from_native(token),
                expected,
                "token {token:?}"
            );
        }
    }

    #[test]
    fn native_tokens_ignore_case() {
        assert_eq!(DataPackageOperation::from_native(Some("COPYLINK")), COPY | LINK);
        assert_eq!(DataPackageOperation::from_native(Some("linkmove")), LINK | MOVE);
        assert_eq!(DataPackageOperation::from_native(Some("All")), COPY | MOVE | LINK);
    }

    #[test]
    fn precedence_is_link_then_copy_then_move() {
        let cases = [
            (DataPackageOperation::NONE, "none"),
            (COPY, "copy"),
            (MOVE, "move"),
            (LINK, "link"),
            (COPY | MOVE, "copy"),
            (COPY | LINK, "link"),
            (MOVE | LINK, "link"),
            (COPY | MOVE | LINK, "link"),
        ];

        for (flags, expected) in cases {
            assert_eq!(flags.to_native(), expected, "flags {flags:?}");
        }
    }

    #[test]
    fn single_operation_tokens_round_trip() {
        for token in ["none", "copy", "move", "link"] {
            let flags = DataPackageOperation::from_native(Some(token));
            assert_eq!(flags.to_native(), token);
        }
    }

    #[test]
    fn combined_tokens_collapse_by_precedence() {
        let cases = [
            ("copyLink", "link"),
            ("copyMove", "copy"),
            ("linkMove", "link"),
            ("all", "link"),
            ("uninitialized", "link"),
        ];

        for (token, expected) in cases {
            let flags = DataPackageOperation::from_native(Some(token));
            assert_eq!(flags.to_native(), expected, "token {token}");
            // Re-parsing the collapsed token is stable.
            assert_eq!(
                DataPackageOperation::from_native(Some(flags.to_native())).to_native(),
                expected
            );
        }
    }
}
