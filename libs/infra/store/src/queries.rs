//! Raw SQL as named constants, matching `db-turso`'s `repositories/job/queries.rs`
//! layout.

pub const SELECT_ALL_METADATA: &str = "
    SELECT search_index_type, starting_search_index, ending_search_index,
           state, creation_time, start_time, end_time, block_hash
    FROM search_metadata
    ORDER BY creation_time ASC
";

pub const SELECT_ALL_RESULTS: &str = "
    SELECT n, divisor_sum, witness_value FROM riemann_divisor_sums
";

pub const SELECT_LARGEST_N: &str = "
    SELECT n, divisor_sum, witness_value FROM riemann_divisor_sums
    ORDER BY length(n) DESC, n DESC LIMIT 1
";

pub const SELECT_LARGEST_WITNESS: &str = "
    SELECT n, divisor_sum, witness_value FROM riemann_divisor_sums
    ORDER BY witness_value DESC LIMIT 1
";

pub const INSERT_BLOCK: &str = "
    INSERT INTO search_metadata
        (search_index_type, starting_search_index, ending_search_index, state, creation_time)
    VALUES (?1, ?2, ?3, 'NOT_STARTED', ?4)
";

pub const SELECT_CLAIMABLE_ID: &str = "
    SELECT id FROM search_metadata
    WHERE search_index_type = ?1 AND state IN ('NOT_STARTED', 'FAILED')
    ORDER BY creation_time ASC
    LIMIT 1
";

pub const CLAIM_BLOCK_BY_ID: &str = "
    UPDATE search_metadata
    SET state = 'IN_PROGRESS', start_time = ?1
    WHERE id = ?2 AND state IN ('NOT_STARTED', 'FAILED')
";

pub const SELECT_METADATA_BY_ID: &str = "
    SELECT search_index_type, starting_search_index, ending_search_index,
           state, creation_time, start_time, end_time, block_hash
    FROM search_metadata WHERE id = ?1
";

pub const SELECT_STATE_BY_TRIPLE: &str = "
    SELECT state FROM search_metadata
    WHERE search_index_type = ?1 AND starting_search_index = ?2 AND ending_search_index = ?3
";

pub const FINISH_BLOCK: &str = "
    UPDATE search_metadata
    SET state = 'FINISHED', end_time = ?1, block_hash = ?2
    WHERE search_index_type = ?3 AND starting_search_index = ?4 AND ending_search_index = ?5
      AND state = 'IN_PROGRESS'
";

pub const MARK_FAILED: &str = "
    UPDATE search_metadata
    SET state = 'FAILED'
    WHERE search_index_type = ?1 AND starting_search_index = ?2 AND ending_search_index = ?3
";

pub const MARK_STALE_IN_PROGRESS_AS_FAILED: &str = "
    UPDATE search_metadata
    SET state = 'FAILED'
    WHERE state = 'IN_PROGRESS' AND start_time < ?1
";

pub const INSERT_RESULT: &str = "
    INSERT INTO riemann_divisor_sums (n, divisor_sum, witness_value) VALUES (?1, ?2, ?3)
";
