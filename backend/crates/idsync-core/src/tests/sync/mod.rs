mod sync_summary;
