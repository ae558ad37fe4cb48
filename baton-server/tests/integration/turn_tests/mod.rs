mod test_holder_disconnect_hands_off;
