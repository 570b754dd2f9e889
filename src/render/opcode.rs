//! Opcode name tables, one per bytecode family.
//!
//! Each family uses the names of its newest release; opcodes retired earlier in
//! the family keep their old names where the number was not reused.
use crate::types::VersionPair;

/// First opcode that carries an argument, for every supported dialect.
pub const HAVE_ARGUMENT: u8 = 90;

/// Inline cache slot on 3.11+.
pub const CACHE: u8 = 0;

/// How to decode and name the instructions of one dialect.
#[derive(Copy, Clone, Debug)]
pub struct Dialect {
    table: &'static [(u8, &'static str)],
    extended_arg: u8,
    /// 2-byte `(opcode, arg)` units (3.6+) instead of 1 or 3 byte instructions.
    pub wordcode: bool,
    /// Instructions are followed by inline CACHE units (3.11+).
    pub inline_caches: bool,
}

impl Dialect {
    pub fn for_version(version: VersionPair) -> Self {
        let (table, extended_arg) = if version.major < 3 {
            // 2.7 moved EXTENDED_ARG from 143 to 145 to make room for SETUP_WITH.
            (PY27, if version.at_least(2, 7) { 145 } else { 143 })
        } else if version.below(3, 9) {
            (PY38, 144)
        } else if version.below(3, 11) {
            (PY310, 144)
        } else if version.below(3, 12) {
            (PY311, 144)
        } else {
            (PY312, 144)
        };

        Dialect {
            table,
            extended_arg,
            wordcode: version.at_least(3, 6),
            inline_caches: version.at_least(3, 11),
        }
    }

    pub fn name(&self, opcode: u8) -> Option<&'static str> {
        if opcode == self.extended_arg {
            return Some("EXTENDED_ARG");
        }
        self.table
            .binary_search_by_key(&opcode, |&(op, _)| op)
            .ok()
            .map(|idx| self.table[idx].1)
    }

    pub fn has_argument(&self, opcode: u8) -> bool {
        opcode >= HAVE_ARGUMENT
    }

    pub fn is_extended_arg(&self, opcode: u8) -> bool {
        opcode == self.extended_arg
    }
}

const PY27: &[(u8, &str)] = &[
    (0, "STOP_CODE"),
    (1, "POP_TOP"),
    (2, "ROT_TWO"),
    (3, "ROT_THREE"),
    (4, "DUP_TOP"),
    (5, "ROT_FOUR"),
    (9, "NOP"),
    (10, "UNARY_POSITIVE"),
    (11, "UNARY_NEGATIVE"),
    (12, "UNARY_NOT"),
    (13, "UNARY_CONVERT"),
    (15, "UNARY_INVERT"),
    (19, "BINARY_POWER"),
    (20, "BINARY_MULTIPLY"),
    (21, "BINARY_DIVIDE"),
    (22, "BINARY_MODULO"),
    (23, "BINARY_ADD"),
    (24, "BINARY_SUBTRACT"),
    (25, "BINARY_SUBSCR"),
    (26, "BINARY_FLOOR_DIVIDE"),
    (27, "BINARY_TRUE_DIVIDE"),
    (28, "INPLACE_FLOOR_DIVIDE"),
    (29, "INPLACE_TRUE_DIVIDE"),
    (30, "SLICE_0"),
    (31, "SLICE_1"),
    (32, "SLICE_2"),
    (33, "SLICE_3"),
    (40, "STORE_SLICE_0"),
    (41, "STORE_SLICE_1"),
    (42, "STORE_SLICE_2"),
    (43, "STORE_SLICE_3"),
    (50, "DELETE_SLICE_0"),
    (51, "DELETE_SLICE_1"),
    (52, "DELETE_SLICE_2"),
    (53, "DELETE_SLICE_3"),
    (54, "STORE_MAP"),
    (55, "INPLACE_ADD"),
    (56, "INPLACE_SUBTRACT"),
    (57, "INPLACE_MULTIPLY"),
    (58, "INPLACE_DIVIDE"),
    (59, "INPLACE_MODULO"),
    (60, "STORE_SUBSCR"),
    (61, "DELETE_SUBSCR"),
    (62, "BINARY_LSHIFT"),
    (63, "BINARY_RSHIFT"),
    (64, "BINARY_AND"),
    (65, "BINARY_XOR"),
    (66, "BINARY_OR"),
    (67, "INPLACE_POWER"),
    (68, "GET_ITER"),
    (70, "PRINT_EXPR"),
    (71, "PRINT_ITEM"),
    (72, "PRINT_NEWLINE"),
    (73, "PRINT_ITEM_TO"),
    (74, "PRINT_NEWLINE_TO"),
    (75, "INPLACE_LSHIFT"),
    (76, "INPLACE_RSHIFT"),
    (77, "INPLACE_AND"),
    (78, "INPLACE_XOR"),
    (79, "INPLACE_OR"),
    (80, "BREAK_LOOP"),
    (81, "WITH_CLEANUP"),
    (82, "LOAD_LOCALS"),
    (83, "RETURN_VALUE"),
    (84, "IMPORT_STAR"),
    (85, "EXEC_STMT"),
    (86, "YIELD_VALUE"),
    (87, "POP_BLOCK"),
    (88, "END_FINALLY"),
    (89, "BUILD_CLASS"),
    (90, "STORE_NAME"),
    (91, "DELETE_NAME"),
    (92, "UNPACK_SEQUENCE"),
    (93, "FOR_ITER"),
    (94, "LIST_APPEND"),
    (95, "STORE_ATTR"),
    (96, "DELETE_ATTR"),
    (97, "STORE_GLOBAL"),
    (98, "DELETE_GLOBAL"),
    (99, "DUP_TOPX"),
    (100, "LOAD_CONST"),
    (101, "LOAD_NAME"),
    (102, "BUILD_TUPLE"),
    (103, "BUILD_LIST"),
    (104, "BUILD_SET"),
    (105, "BUILD_MAP"),
    (106, "LOAD_ATTR"),
    (107, "COMPARE_OP"),
    (108, "IMPORT_NAME"),
    (109, "IMPORT_FROM"),
    (110, "JUMP_FORWARD"),
    (111, "JUMP_IF_FALSE_OR_POP"),
    (112, "JUMP_IF_TRUE_OR_POP"),
    (113, "JUMP_ABSOLUTE"),
    (114, "POP_JUMP_IF_FALSE"),
    (115, "POP_JUMP_IF_TRUE"),
    (116, "LOAD_GLOBAL"),
    (119, "CONTINUE_LOOP"),
    (120, "SETUP_LOOP"),
    (121, "SETUP_EXCEPT"),
    (122, "SETUP_FINALLY"),
    (124, "LOAD_FAST"),
    (125, "STORE_FAST"),
    (126, "DELETE_FAST"),
    (130, "RAISE_VARARGS"),
    (131, "CALL_FUNCTION"),
    (132, "MAKE_FUNCTION"),
    (133, "BUILD_SLICE"),
    (134, "MAKE_CLOSURE"),
    (135, "LOAD_CLOSURE"),
    (136, "LOAD_DEREF"),
    (137, "STORE_DEREF"),
    (140, "CALL_FUNCTION_VAR"),
    (141, "CALL_FUNCTION_KW"),
    (142, "CALL_FUNCTION_VAR_KW"),
    (143, "SETUP_WITH"),
    (146, "SET_ADD"),
    (147, "MAP_ADD"),
];

const PY38: &[(u8, &str)] = &[
    (1, "POP_TOP"),
    (2, "ROT_TWO"),
    (3, "ROT_THREE"),
    (4, "DUP_TOP"),
    (5, "DUP_TOP_TWO"),
    (6, "ROT_FOUR"),
    (9, "NOP"),
    (10, "UNARY_POSITIVE"),
    (11, "UNARY_NEGATIVE"),
    (12, "UNARY_NOT"),
    (15, "UNARY_INVERT"),
    (16, "BINARY_MATRIX_MULTIPLY"),
    (17, "INPLACE_MATRIX_MULTIPLY"),
    (19, "BINARY_POWER"),
    (20, "BINARY_MULTIPLY"),
    (22, "BINARY_MODULO"),
    (23, "BINARY_ADD"),
    (24, "BINARY_SUBTRACT"),
    (25, "BINARY_SUBSCR"),
    (26, "BINARY_FLOOR_DIVIDE"),
    (27, "BINARY_TRUE_DIVIDE"),
    (28, "INPLACE_FLOOR_DIVIDE"),
    (29, "INPLACE_TRUE_DIVIDE"),
    (50, "GET_AITER"),
    (51, "GET_ANEXT"),
    (52, "BEFORE_ASYNC_WITH"),
    (53, "BEGIN_FINALLY"),
    (54, "END_ASYNC_FOR"),
    (55, "INPLACE_ADD"),
    (56, "INPLACE_SUBTRACT"),
    (57, "INPLACE_MULTIPLY"),
    (59, "INPLACE_MODULO"),
    (60, "STORE_SUBSCR"),
    (61, "DELETE_SUBSCR"),
    (62, "BINARY_LSHIFT"),
    (63, "BINARY_RSHIFT"),
    (64, "BINARY_AND"),
    (65, "BINARY_XOR"),
    (66, "BINARY_OR"),
    (67, "INPLACE_POWER"),
    (68, "GET_ITER"),
    (69, "GET_YIELD_FROM_ITER"),
    (70, "PRINT_EXPR"),
    (71, "LOAD_BUILD_CLASS"),
    (72, "YIELD_FROM"),
    (73, "GET_AWAITABLE"),
    (75, "INPLACE_LSHIFT"),
    (76, "INPLACE_RSHIFT"),
    (77, "INPLACE_AND"),
    (78, "INPLACE_XOR"),
    (79, "INPLACE_OR"),
    (80, "BREAK_LOOP"),
    (81, "WITH_CLEANUP_START"),
    (82, "WITH_CLEANUP_FINISH"),
    (83, "RETURN_VALUE"),
    (84, "IMPORT_STAR"),
    (85, "SETUP_ANNOTATIONS"),
    (86, "YIELD_VALUE"),
    (87, "POP_BLOCK"),
    (88, "END_FINALLY"),
    (89, "POP_EXCEPT"),
    (90, "STORE_NAME"),
    (91, "DELETE_NAME"),
    (92, "UNPACK_SEQUENCE"),
    (93, "FOR_ITER"),
    (94, "UNPACK_EX"),
    (95, "STORE_ATTR"),
    (96, "DELETE_ATTR"),
    (97, "STORE_GLOBAL"),
    (98, "DELETE_GLOBAL"),
    (100, "LOAD_CONST"),
    (101, "LOAD_NAME"),
    (102, "BUILD_TUPLE"),
    (103, "BUILD_LIST"),
    (104, "BUILD_SET"),
    (105, "BUILD_MAP"),
    (106, "LOAD_ATTR"),
    (107, "COMPARE_OP"),
    (108, "IMPORT_NAME"),
    (109, "IMPORT_FROM"),
    (110, "JUMP_FORWARD"),
    (111, "JUMP_IF_FALSE_OR_POP"),
    (112, "JUMP_IF_TRUE_OR_POP"),
    (113, "JUMP_ABSOLUTE"),
    (114, "POP_JUMP_IF_FALSE"),
    (115, "POP_JUMP_IF_TRUE"),
    (116, "LOAD_GLOBAL"),
    (119, "CONTINUE_LOOP"),
    (120, "SETUP_LOOP"),
    (121, "SETUP_EXCEPT"),
    (122, "SETUP_FINALLY"),
    (124, "LOAD_FAST"),
    (125, "STORE_FAST"),
    (126, "DELETE_FAST"),
    (130, "RAISE_VARARGS"),
    (131, "CALL_FUNCTION"),
    (132, "MAKE_FUNCTION"),
    (133, "BUILD_SLICE"),
    (134, "MAKE_CLOSURE"),
    (135, "LOAD_CLOSURE"),
    (136, "LOAD_DEREF"),
    (137, "STORE_DEREF"),
    (138, "DELETE_DEREF"),
    (140, "CALL_FUNCTION_VAR"),
    (141, "CALL_FUNCTION_KW"),
    (142, "CALL_FUNCTION_EX"),
    (143, "SETUP_WITH"),
    (145, "LIST_APPEND"),
    (146, "SET_ADD"),
    (147, "MAP_ADD"),
    (148, "LOAD_CLASSDEREF"),
    (149, "BUILD_LIST_UNPACK"),
    (150, "BUILD_MAP_UNPACK"),
    (151, "BUILD_MAP_UNPACK_WITH_CALL"),
    (152, "BUILD_TUPLE_UNPACK"),
    (153, "BUILD_SET_UNPACK"),
    (154, "SETUP_ASYNC_WITH"),
    (155, "FORMAT_VALUE"),
    (156, "BUILD_CONST_KEY_MAP"),
    (157, "BUILD_STRING"),
    (158, "BUILD_TUPLE_UNPACK_WITH_CALL"),
    (160, "LOAD_METHOD"),
    (161, "CALL_METHOD"),
    (162, "CALL_FINALLY"),
    (163, "POP_FINALLY"),
];

const PY310: &[(u8, &str)] = &[
    (1, "POP_TOP"),
    (2, "ROT_TWO"),
    (3, "ROT_THREE"),
    (4, "DUP_TOP"),
    (5, "DUP_TOP_TWO"),
    (6, "ROT_FOUR"),
    (9, "NOP"),
    (10, "UNARY_POSITIVE"),
    (11, "UNARY_NEGATIVE"),
    (12, "UNARY_NOT"),
    (15, "UNARY_INVERT"),
    (16, "BINARY_MATRIX_MULTIPLY"),
    (17, "INPLACE_MATRIX_MULTIPLY"),
    (19, "BINARY_POWER"),
    (20, "BINARY_MULTIPLY"),
    (22, "BINARY_MODULO"),
    (23, "BINARY_ADD"),
    (24, "BINARY_SUBTRACT"),
    (25, "BINARY_SUBSCR"),
    (26, "BINARY_FLOOR_DIVIDE"),
    (27, "BINARY_TRUE_DIVIDE"),
    (28, "INPLACE_FLOOR_DIVIDE"),
    (29, "INPLACE_TRUE_DIVIDE"),
    (30, "GET_LEN"),
    (31, "MATCH_MAPPING"),
    (32, "MATCH_SEQUENCE"),
    (33, "MATCH_KEYS"),
    (34, "COPY_DICT_WITHOUT_KEYS"),
    (48, "RERAISE"),
    (49, "WITH_EXCEPT_START"),
    (50, "GET_AITER"),
    (51, "GET_ANEXT"),
    (52, "BEFORE_ASYNC_WITH"),
    (54, "END_ASYNC_FOR"),
    (55, "INPLACE_ADD"),
    (56, "INPLACE_SUBTRACT"),
    (57, "INPLACE_MULTIPLY"),
    (59, "INPLACE_MODULO"),
    (60, "STORE_SUBSCR"),
    (61, "DELETE_SUBSCR"),
    (62, "BINARY_LSHIFT"),
    (63, "BINARY_RSHIFT"),
    (64, "BINARY_AND"),
    (65, "BINARY_XOR"),
    (66, "BINARY_OR"),
    (67, "INPLACE_POWER"),
    (68, "GET_ITER"),
    (69, "GET_YIELD_FROM_ITER"),
    (70, "PRINT_EXPR"),
    (71, "LOAD_BUILD_CLASS"),
    (72, "YIELD_FROM"),
    (73, "GET_AWAITABLE"),
    (74, "LOAD_ASSERTION_ERROR"),
    (75, "INPLACE_LSHIFT"),
    (76, "INPLACE_RSHIFT"),
    (77, "INPLACE_AND"),
    (78, "INPLACE_XOR"),
    (79, "INPLACE_OR"),
    (82, "LIST_TO_TUPLE"),
    (83, "RETURN_VALUE"),
    (84, "IMPORT_STAR"),
    (85, "SETUP_ANNOTATIONS"),
    (86, "YIELD_VALUE"),
    (87, "POP_BLOCK"),
    (89, "POP_EXCEPT"),
    (90, "STORE_NAME"),
    (91, "DELETE_NAME"),
    (92, "UNPACK_SEQUENCE"),
    (93, "FOR_ITER"),
    (94, "UNPACK_EX"),
    (95, "STORE_ATTR"),
    (96, "DELETE_ATTR"),
    (97, "STORE_GLOBAL"),
    (98, "DELETE_GLOBAL"),
    (99, "ROT_N"),
    (100, "LOAD_CONST"),
    (101, "LOAD_NAME"),
    (102, "BUILD_TUPLE"),
    (103, "BUILD_LIST"),
    (104, "BUILD_SET"),
    (105, "BUILD_MAP"),
    (106, "LOAD_ATTR"),
    (107, "COMPARE_OP"),
    (108, "IMPORT_NAME"),
    (109, "IMPORT_FROM"),
    (110, "JUMP_FORWARD"),
    (111, "JUMP_IF_FALSE_OR_POP"),
    (112, "JUMP_IF_TRUE_OR_POP"),
    (113, "JUMP_ABSOLUTE"),
    (114, "POP_JUMP_IF_FALSE"),
    (115, "POP_JUMP_IF_TRUE"),
    (116, "LOAD_GLOBAL"),
    (117, "IS_OP"),
    (118, "CONTAINS_OP"),
    (119, "RERAISE"),
    (121, "JUMP_IF_NOT_EXC_MATCH"),
    (122, "SETUP_FINALLY"),
    (124, "LOAD_FAST"),
    (125, "STORE_FAST"),
    (126, "DELETE_FAST"),
    (129, "GEN_START"),
    (130, "RAISE_VARARGS"),
    (131, "CALL_FUNCTION"),
    (132, "MAKE_FUNCTION"),
    (133, "BUILD_SLICE"),
    (135, "LOAD_CLOSURE"),
    (136, "LOAD_DEREF"),
    (137, "STORE_DEREF"),
    (138, "DELETE_DEREF"),
    (141, "CALL_FUNCTION_KW"),
    (142, "CALL_FUNCTION_EX"),
    (143, "SETUP_WITH"),
    (145, "LIST_APPEND"),
    (146, "SET_ADD"),
    (147, "MAP_ADD"),
    (148, "LOAD_CLASSDEREF"),
    (152, "MATCH_CLASS"),
    (154, "SETUP_ASYNC_WITH"),
    (155, "FORMAT_VALUE"),
    (156, "BUILD_CONST_KEY_MAP"),
    (157, "BUILD_STRING"),
    (160, "LOAD_METHOD"),
    (161, "CALL_METHOD"),
    (162, "LIST_EXTEND"),
    (163, "SET_UPDATE"),
    (164, "DICT_MERGE"),
    (165, "DICT_UPDATE"),
];

const PY311: &[(u8, &str)] = &[
    (0, "CACHE"),
    (1, "POP_TOP"),
    (2, "PUSH_NULL"),
    (9, "NOP"),
    (10, "UNARY_POSITIVE"),
    (11, "UNARY_NEGATIVE"),
    (12, "UNARY_NOT"),
    (15, "UNARY_INVERT"),
    (25, "BINARY_SUBSCR"),
    (30, "GET_LEN"),
    (31, "MATCH_MAPPING"),
    (32, "MATCH_SEQUENCE"),
    (33, "MATCH_KEYS"),
    (35, "PUSH_EXC_INFO"),
    (36, "CHECK_EXC_MATCH"),
    (37, "CHECK_EG_MATCH"),
    (49, "WITH_EXCEPT_START"),
    (50, "GET_AITER"),
    (51, "GET_ANEXT"),
    (52, "BEFORE_ASYNC_WITH"),
    (53, "BEFORE_WITH"),
    (54, "END_ASYNC_FOR"),
    (60, "STORE_SUBSCR"),
    (61, "DELETE_SUBSCR"),
    (68, "GET_ITER"),
    (69, "GET_YIELD_FROM_ITER"),
    (70, "PRINT_EXPR"),
    (71, "LOAD_BUILD_CLASS"),
    (74, "LOAD_ASSERTION_ERROR"),
    (75, "RETURN_GENERATOR"),
    (82, "LIST_TO_TUPLE"),
    (83, "RETURN_VALUE"),
    (84, "IMPORT_STAR"),
    (85, "SETUP_ANNOTATIONS"),
    (86, "YIELD_VALUE"),
    (87, "ASYNC_GEN_WRAP"),
    (88, "PREP_RERAISE_STAR"),
    (89, "POP_EXCEPT"),
    (90, "STORE_NAME"),
    (91, "DELETE_NAME"),
    (92, "UNPACK_SEQUENCE"),
    (93, "FOR_ITER"),
    (94, "UNPACK_EX"),
    (95, "STORE_ATTR"),
    (96, "DELETE_ATTR"),
    (97, "STORE_GLOBAL"),
    (98, "DELETE_GLOBAL"),
    (99, "SWAP"),
    (100, "LOAD_CONST"),
    (101, "LOAD_NAME"),
    (102, "BUILD_TUPLE"),
    (103, "BUILD_LIST"),
    (104, "BUILD_SET"),
    (105, "BUILD_MAP"),
    (106, "LOAD_ATTR"),
    (107, "COMPARE_OP"),
    (108, "IMPORT_NAME"),
    (109, "IMPORT_FROM"),
    (110, "JUMP_FORWARD"),
    (111, "JUMP_IF_FALSE_OR_POP"),
    (112, "JUMP_IF_TRUE_OR_POP"),
    (114, "POP_JUMP_FORWARD_IF_FALSE"),
    (115, "POP_JUMP_FORWARD_IF_TRUE"),
    (116, "LOAD_GLOBAL"),
    (117, "IS_OP"),
    (118, "CONTAINS_OP"),
    (119, "RERAISE"),
    (120, "COPY"),
    (122, "BINARY_OP"),
    (123, "SEND"),
    (124, "LOAD_FAST"),
    (125, "STORE_FAST"),
    (126, "DELETE_FAST"),
    (128, "POP_JUMP_FORWARD_IF_NOT_NONE"),
    (129, "POP_JUMP_FORWARD_IF_NONE"),
    (130, "RAISE_VARARGS"),
    (131, "GET_AWAITABLE"),
    (132, "MAKE_FUNCTION"),
    (133, "BUILD_SLICE"),
    (134, "JUMP_BACKWARD_NO_INTERRUPT"),
    (135, "MAKE_CELL"),
    (136, "LOAD_CLOSURE"),
    (137, "LOAD_DEREF"),
    (138, "STORE_DEREF"),
    (139, "DELETE_DEREF"),
    (140, "JUMP_BACKWARD"),
    (142, "CALL_FUNCTION_EX"),
    (145, "LIST_APPEND"),
    (146, "SET_ADD"),
    (147, "MAP_ADD"),
    (148, "LOAD_CLASSDEREF"),
    (149, "COPY_FREE_VARS"),
    (151, "RESUME"),
    (152, "MATCH_CLASS"),
    (155, "FORMAT_VALUE"),
    (156, "BUILD_CONST_KEY_MAP"),
    (157, "BUILD_STRING"),
    (160, "LOAD_METHOD"),
    (162, "LIST_EXTEND"),
    (163, "SET_UPDATE"),
    (164, "DICT_MERGE"),
    (165, "DICT_UPDATE"),
    (166, "PRECALL"),
    (171, "CALL"),
    (172, "KW_NAMES"),
    (173, "POP_JUMP_BACKWARD_IF_NOT_NONE"),
    (174, "POP_JUMP_BACKWARD_IF_NONE"),
    (175, "POP_JUMP_BACKWARD_IF_FALSE"),
    (176, "POP_JUMP_BACKWARD_IF_TRUE"),
];

const PY312: &[(u8, &str)] = &[
    (0, "CACHE"),
    (1, "POP_TOP"),
    (2, "PUSH_NULL"),
    (3, "INTERPRETER_EXIT"),
    (4, "END_FOR"),
    (5, "END_SEND"),
    (9, "NOP"),
    (11, "UNARY_NEGATIVE"),
    (12, "UNARY_NOT"),
    (15, "UNARY_INVERT"),
    (17, "RESERVED"),
    (25, "BINARY_SUBSCR"),
    (26, "BINARY_SLICE"),
    (27, "STORE_SLICE"),
    (30, "GET_LEN"),
    (31, "MATCH_MAPPING"),
    (32, "MATCH_SEQUENCE"),
    (33, "MATCH_KEYS"),
    (35, "PUSH_EXC_INFO"),
    (36, "CHECK_EXC_MATCH"),
    (37, "CHECK_EG_MATCH"),
    (49, "WITH_EXCEPT_START"),
    (50, "GET_AITER"),
    (51, "GET_ANEXT"),
    (52, "BEFORE_ASYNC_WITH"),
    (53, "BEFORE_WITH"),
    (54, "END_ASYNC_FOR"),
    (55, "CLEANUP_THROW"),
    (60, "STORE_SUBSCR"),
    (61, "DELETE_SUBSCR"),
    (68, "GET_ITER"),
    (69, "GET_YIELD_FROM_ITER"),
    (71, "LOAD_BUILD_CLASS"),
    (74, "LOAD_ASSERTION_ERROR"),
    (75, "RETURN_GENERATOR"),
    (83, "RETURN_VALUE"),
    (85, "SETUP_ANNOTATIONS"),
    (87, "LOAD_LOCALS"),
    (89, "POP_EXCEPT"),
    (90, "STORE_NAME"),
    (91, "DELETE_NAME"),
    (92, "UNPACK_SEQUENCE"),
    (93, "FOR_ITER"),
    (94, "UNPACK_EX"),
    (95, "STORE_ATTR"),
    (96, "DELETE_ATTR"),
    (97, "STORE_GLOBAL"),
    (98, "DELETE_GLOBAL"),
    (99, "SWAP"),
    (100, "LOAD_CONST"),
    (101, "LOAD_NAME"),
    (102, "BUILD_TUPLE"),
    (103, "BUILD_LIST"),
    (104, "BUILD_SET"),
    (105, "BUILD_MAP"),
    (106, "LOAD_ATTR"),
    (107, "COMPARE_OP"),
    (108, "IMPORT_NAME"),
    (109, "IMPORT_FROM"),
    (110, "JUMP_FORWARD"),
    (114, "POP_JUMP_IF_FALSE"),
    (115, "POP_JUMP_IF_TRUE"),
    (116, "LOAD_GLOBAL"),
    (117, "IS_OP"),
    (118, "CONTAINS_OP"),
    (119, "RERAISE"),
    (120, "COPY"),
    (121, "RETURN_CONST"),
    (122, "BINARY_OP"),
    (123, "SEND"),
    (124, "LOAD_FAST"),
    (125, "STORE_FAST"),
    (126, "DELETE_FAST"),
    (127, "LOAD_FAST_CHECK"),
    (128, "POP_JUMP_IF_NOT_NONE"),
    (129, "POP_JUMP_IF_NONE"),
    (130, "RAISE_VARARGS"),
    (131, "GET_AWAITABLE"),
    (132, "MAKE_FUNCTION"),
    (133, "BUILD_SLICE"),
    (134, "JUMP_BACKWARD_NO_INTERRUPT"),
    (135, "MAKE_CELL"),
    (136, "LOAD_CLOSURE"),
    (137, "LOAD_DEREF"),
    (138, "STORE_DEREF"),
    (139, "DELETE_DEREF"),
    (140, "JUMP_BACKWARD"),
    (141, "LOAD_SUPER_ATTR"),
    (142, "CALL_FUNCTION_EX"),
    (143, "LOAD_FAST_AND_CLEAR"),
    (145, "LIST_APPEND"),
    (146, "SET_ADD"),
    (147, "MAP_ADD"),
    (149, "COPY_FREE_VARS"),
    (150, "YIELD_VALUE"),
    (151, "RESUME"),
    (152, "MATCH_CLASS"),
    (155, "FORMAT_VALUE"),
    (156, "BUILD_CONST_KEY_MAP"),
    (157, "BUILD_STRING"),
    (162, "LIST_EXTEND"),
    (163, "SET_UPDATE"),
    (164, "DICT_MERGE"),
    (165, "DICT_UPDATE"),
    (171, "CALL"),
    (172, "KW_NAMES"),
    (173, "CALL_INTRINSIC_1"),
    (174, "CALL_INTRINSIC_2"),
    (175, "LOAD_FROM_DICT_OR_GLOBALS"),
    (176, "LOAD_FROM_DICT_OR_DEREF"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted() {
        for table in [PY27, PY38, PY310, PY311, PY312] {
            assert!(table.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn picks_family_per_version() {
        let py27 = Dialect::for_version(VersionPair::new(2, 7));
        assert_eq!(py27.name(100), Some("LOAD_CONST"));
        assert_eq!(py27.name(145), Some("EXTENDED_ARG"));
        assert!(!py27.wordcode);

        let py26 = Dialect::for_version(VersionPair::new(2, 6));
        assert_eq!(py26.name(143), Some("EXTENDED_ARG"));

        let py311 = Dialect::for_version(VersionPair::new(3, 11));
        assert!(py311.wordcode && py311.inline_caches);
        assert_eq!(py311.name(CACHE), Some("CACHE"));
        assert_eq!(py311.name(151), Some("RESUME"));

        let py36 = Dialect::for_version(VersionPair::new(3, 6));
        assert!(py36.wordcode && !py36.inline_caches);
        assert_eq!(py36.name(7), None);
    }
}
