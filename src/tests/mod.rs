mod unavailable;
